//! 商品选择逻辑
//!
//! 纯业务逻辑：从目录结果中选出一个可购买的商品与库存充足的变体。
//! 策略为"取第一个"，不做搜索或排序；同一份目录的选择结果是确定的。

use crate::error::SelectionError;
use crate::listing::{ProductListing, StockStatus};

/// 库存安全阈值
///
/// 只选可用库存高于该值的变体，确保并发压测期间不会把库存打穿。
/// 这是一个建议性的策略常量，不是库存预留。
pub const STOCK_SAFETY_THRESHOLD: u64 = 40;

/// 选中的父商品与变体 SKU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuPair {
    pub parent_sku: String,
    pub variant_sku: String,
}

/// 从目录中选择可购买的商品
///
/// 1. 列表为空 -> EmptyListing
/// 2. 取第一个商品，非 IN_STOCK -> OutOfStock（不看后续商品）
/// 3. 有变体时按顺序取第一个库存 > 阈值的变体，否则 NoStockedVariant
/// 4. 无变体的商品自身即为可购买单元（variant_sku = parent_sku）
pub fn select(listing: &ProductListing) -> Result<SkuPair, SelectionError> {
    let product = listing.items.first().ok_or(SelectionError::EmptyListing)?;

    if product.stock_status != StockStatus::InStock {
        return Err(SelectionError::OutOfStock {
            sku: product.sku.clone(),
            status: product.stock_status.to_string(),
        });
    }

    if product.variants.is_empty() {
        return Ok(SkuPair {
            parent_sku: product.sku.clone(),
            variant_sku: product.sku.clone(),
        });
    }

    let variant = product
        .variants
        .iter()
        .find(|v| v.stock_available_qty > STOCK_SAFETY_THRESHOLD)
        .ok_or_else(|| SelectionError::NoStockedVariant {
            sku: product.sku.clone(),
        })?;

    Ok(SkuPair {
        parent_sku: product.sku.clone(),
        variant_sku: variant.sku.clone(),
    })
}
