//! 商品目录数据模型
//!
//! `GET /e-products` 返回 `{data:{items:[...]}}`，其中每个变体的字段
//! 嵌套在 `product` 对象下（`variants[i].product.sku`）。反序列化时
//! 将这层包装展平为扁平的 `Variant`，引擎其余部分不感知线上格式。

use serde::Deserialize;

use crate::error::StepError;

/// 商品库存状态
///
/// 服务端可能返回未知状态值，统一归入 Other，选择逻辑只认 IN_STOCK。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InStock => "IN_STOCK",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// 商品变体
///
/// 线上格式为 `{"product": {"sku": "...", "stock_available_qty": N}}`，
/// 手写 Deserialize 负责展平。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub sku: String,
    pub stock_available_qty: u64,
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            product: Inner,
        }

        #[derive(Deserialize)]
        struct Inner {
            sku: String,
            #[serde(default)]
            stock_available_qty: u64,
        }

        let wire = Wire::deserialize(deserializer)?;
        Ok(Self {
            sku: wire.product.sku,
            stock_available_qty: wire.product.stock_available_qty,
        })
    }
}

/// 商品
///
/// 没有变体的商品自身即为唯一可购买单元。
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub sku: String,
    pub stock_status: StockStatus,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// 商品目录查询结果，保持服务端返回顺序
#[derive(Debug, Clone, Default)]
pub struct ProductListing {
    pub items: Vec<Product>,
}

/// 从响应体解析商品目录
///
/// 解析失败对商品发现步骤而言是致命的，由调用方决定。
pub fn parse_listing(body: &str) -> Result<ProductListing, StepError> {
    #[derive(Deserialize)]
    struct Envelope {
        data: Data,
    }

    #[derive(Deserialize)]
    struct Data {
        #[serde(default)]
        items: Vec<Product>,
    }

    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| StepError::MalformedResponse {
            reason: format!("商品列表解析失败: {e}"),
        })?;

    Ok(ProductListing {
        items: envelope.data.items,
    })
}
