//! 商品目录夹具
//!
//! 生成与线上目录接口同形的 JSON：`data.items` 列表，变体信息
//! 嵌套在每个条目的 `product` 对象下。故障开关可以让目录为空、
//! 首个商品无库存或所有变体库存量低于选择阈值。

use serde_json::{Value, json};

use crate::state::FaultConfig;

/// 按故障配置生成目录响应体
pub fn listing(faults: FaultConfig) -> Value {
    if faults.empty_catalog {
        return json!({ "data": { "items": [] } });
    }

    let stock_status = if faults.out_of_stock {
        "OUT_OF_STOCK"
    } else {
        "IN_STOCK"
    };

    // 首个变体故意低于阈值，正常路径应选中第二个变体
    let (first_qty, second_qty) = if faults.low_stock { (5, 12) } else { (10, 50) };

    json!({
        "data": {
            "items": [
                {
                    "sku": "TSHIRT-CLASSIC",
                    "stock_status": stock_status,
                    "variants": [
                        { "product": { "sku": "TSHIRT-CLASSIC-S", "stock_available_qty": first_qty } },
                        { "product": { "sku": "TSHIRT-CLASSIC-M", "stock_available_qty": second_qty } }
                    ]
                },
                {
                    "sku": "MUG-PLAIN",
                    "stock_status": "IN_STOCK",
                    "variants": []
                }
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listing_shape() {
        let body = listing(FaultConfig::default());
        let items = body["data"]["items"].as_array().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["stock_status"], "IN_STOCK");
        assert_eq!(
            items[0]["variants"][1]["product"]["stock_available_qty"],
            50
        );
    }

    #[test]
    fn test_empty_catalog_fault() {
        let faults = FaultConfig {
            empty_catalog: true,
            ..Default::default()
        };
        let body = listing(faults);
        assert!(body["data"]["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_low_stock_fault_keeps_all_variants_under_threshold() {
        let faults = FaultConfig {
            low_stock: true,
            ..Default::default()
        };
        let body = listing(faults);
        let variants = body["data"]["items"][0]["variants"].as_array().unwrap();
        for variant in variants {
            assert!(variant["product"]["stock_available_qty"].as_u64().unwrap() <= 40);
        }
    }
}
