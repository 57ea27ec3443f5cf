//! 配置管理
//!
//! 支持 TOML 配置文件加载与 LOADTEST_ 前缀的环境变量覆盖，
//! 所有小节都有可直接运行的默认值（默认指向本地 mock 商城）。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::checks::DEFAULT_LATENCY_BUDGET_MS;

/// 压测目标配置
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// 目标 API 根地址
    pub base_url: String,
    /// store 请求头取值
    pub store: String,
    /// fl-build-version 请求头取值（商品目录接口要求）
    pub build_version: String,
    /// fl-platform 请求头取值
    pub platform: String,
    /// 单请求超时（秒）
    pub request_timeout_seconds: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            store: "default".to_string(),
            build_version: "123".to_string(),
            platform: "Android".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// 压测账号配置
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// 注册用户流程使用的账号
    pub registered_email: String,
    pub registered_password: String,
    /// 匿名流程结尾设置的访客邮箱
    pub guest_email: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            registered_email: "loadtest.user@example.com".to_string(),
            registered_password: "Passw0rd!".to_string(),
            guest_email: "guest@example.com".to_string(),
        }
    }
}

/// 执行形态配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// 每个场景的并发虚拟用户数
    pub virtual_users: u32,
    /// 每个虚拟用户顺序执行的迭代次数
    pub iterations_per_user: u32,
    /// 同一虚拟用户两次迭代之间的间歇（秒）
    pub settle_seconds: u64,
    /// 响应延迟预算（毫秒）
    pub latency_budget_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            virtual_users: 50,
            iterations_per_user: 3,
            settle_seconds: 1,
            latency_budget_ms: DEFAULT_LATENCY_BUDGET_MS,
        }
    }
}

/// 地址载荷配置
#[derive(Debug, Clone, Deserialize)]
pub struct AddressConfig {
    pub region: String,
    pub country_code: String,
    pub street: Vec<String>,
    pub telephone: String,
    pub postcode: String,
    pub city: String,
    pub firstname: String,
    pub lastname: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            region: "PL".to_string(),
            country_code: "PL".to_string(),
            street: vec!["Piotrkowska 21".to_string()],
            telephone: "371501501".to_string(),
            postcode: "90-001".to_string(),
            city: "Łódź".to_string(),
            firstname: "John".to_string(),
            lastname: "Paul".to_string(),
        }
    }
}

impl AddressConfig {
    /// 匿名流程的默认地址（与注册流程使用不同的收件人）
    pub fn guest_default() -> Self {
        Self {
            street: vec!["Piotrkowska 120".to_string()],
            telephone: "501501501".to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            ..Self::default()
        }
    }

    /// 生成接口要求的地址 JSON（save_in_address_book 固定为 false）
    pub fn to_json(&self) -> Value {
        json!({
            "region": self.region,
            "country_code": self.country_code,
            "street": self.street,
            "telephone": self.telephone,
            "postcode": self.postcode,
            "city": self.city,
            "firstname": self.firstname,
            "lastname": self.lastname,
            "save_in_address_book": false,
        })
    }
}

/// 支付方式配置
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub method_code: String,
    pub is_invoice: bool,
    pub payu_method: String,
    pub payu_method_type: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            method_code: "payu_gateway".to_string(),
            is_invoice: false,
            payu_method: "blik".to_string(),
            payu_method_type: "PBL".to_string(),
        }
    }
}

impl PaymentConfig {
    pub fn to_json(&self) -> Value {
        json!({
            "methodCode": self.method_code,
            "is_invoice": self.is_invoice,
            "payu_gateway": {
                "payu_method": self.payu_method,
                "payu_method_type": self.payu_method_type,
            },
        })
    }
}

/// 下单载荷配置
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// 注册流程使用的地址
    #[serde(default)]
    pub address: AddressConfig,
    /// 匿名流程使用的地址
    #[serde(default = "AddressConfig::guest_default")]
    pub guest_address: AddressConfig,
    /// 物流承运商编码
    pub carrier_code: String,
    /// 配送方式编码
    pub method_code: String,
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            address: AddressConfig::default(),
            guest_address: AddressConfig::guest_default(),
            carrier_code: "owsh1".to_string(),
            method_code: "dpd".to_string(),
            payment: PaymentConfig::default(),
        }
    }
}

/// 压测总配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadTestConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl LoadTestConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的覆盖先加载的）：
    /// 1. 内置默认值
    /// 2. 指定的 TOML 文件（可选）
    /// 3. 环境变量（LOADTEST_ 前缀，如 LOADTEST_TARGET_STORE -> target.store）
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("LOADTEST")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
