//! 路由与处理器
//!
//! 覆盖压测流程触达的全部端点：登录、建购物车、商品目录、加购
//! 与四个购物车设置接口。响应形状与线上接口一致，处理器内部
//! 只做最小的状态维护与故障注入。

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog;
use crate::state::{CartItem, StorefrontState};

/// 构建完整路由表
pub fn app(state: StorefrontState) -> Router {
    Router::new()
        .route("/customers/token", post(sign_in))
        .route("/cart", post(create_cart))
        .route("/e-products", get(list_products))
        .route("/cart/{cart_id}", patch(add_to_cart))
        .route("/cart/{cart_id}/set_billing_address", post(set_billing_address))
        .route("/cart/{cart_id}/set_shipping_address", post(set_shipping_address))
        .route("/cart/{cart_id}/set_shipping_method", post(set_shipping_method))
        .route("/cart/{cart_id}/set_payment_method", post(set_payment_method))
        .route("/cart/{cart_id}/set_guest_email", post(set_guest_email))
        .with_state(state)
}

// ============================================================================
// 请求 DTO
// ============================================================================

#[derive(Debug, Deserialize)]
struct SignInRequest {
    email: String,
    #[allow(dead_code)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct AddToCartRequest {
    #[serde(rename = "parentSku")]
    parent_sku: String,
    sku: String,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct ShippingMethodRequest {
    #[serde(rename = "carrierCode")]
    carrier_code: String,
    #[serde(rename = "methodCode")]
    method_code: String,
}

#[derive(Debug, Deserialize)]
struct GuestEmailRequest {
    email: String,
}

// ============================================================================
// 路由处理器
// ============================================================================

/// 登录
///
/// POST /customers/token
async fn sign_in(
    State(state): State<StorefrontState>,
    Json(req): Json<SignInRequest>,
) -> Json<Value> {
    state.record_hit("sign_in");
    info!(email = %req.email, "登录");

    Json(json!({ "data": { "token": format!("mock-token-{}", Uuid::new_v4()) } }))
}

/// 创建购物车
///
/// POST /cart
async fn create_cart(State(state): State<StorefrontState>) -> Json<Value> {
    state.record_hit("create_cart");
    let cart_id = state.create_cart();
    info!(cart_id = %cart_id, "创建购物车");

    Json(json!({ "data": cart_id }))
}

/// 商品目录
///
/// GET /e-products
async fn list_products(State(state): State<StorefrontState>) -> Json<Value> {
    state.record_hit("list_products");
    Json(catalog::listing(state.faults))
}

/// 加购
///
/// PATCH /cart/:cart_id
async fn add_to_cart(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("add_to_cart");

    let updated = state.with_cart(&cart_id, |cart| {
        cart.items.push(CartItem {
            parent_sku: req.parent_sku.clone(),
            sku: req.sku.clone(),
            quantity: req.quantity,
        });
    });

    if updated {
        info!(cart_id = %cart_id, sku = %req.sku, "加购");
        Ok(Json(json!({ "status": "success" })))
    } else {
        warn!(cart_id = %cart_id, "购物车不存在");
        Err(StatusCode::NOT_FOUND)
    }
}

/// 设置账单地址
///
/// POST /cart/:cart_id/set_billing_address
async fn set_billing_address(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(_body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("set_billing_address");

    if state.with_cart(&cart_id, |cart| cart.billing_address_set = true) {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// 设置配送地址
///
/// POST /cart/:cart_id/set_shipping_address
async fn set_shipping_address(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(_body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("set_shipping_address");

    if state.faults.fail_shipping_address {
        warn!(cart_id = %cart_id, "配送地址接口故障注入");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    if state.with_cart(&cart_id, |cart| cart.shipping_address_set = true) {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// 设置配送方式
///
/// POST /cart/:cart_id/set_shipping_method
async fn set_shipping_method(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(req): Json<ShippingMethodRequest>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("set_shipping_method");

    let method = format!("{}/{}", req.carrier_code, req.method_code);
    if state.with_cart(&cart_id, |cart| cart.shipping_method = Some(method)) {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// 设置支付方式
///
/// POST /cart/:cart_id/set_payment_method
async fn set_payment_method(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("set_payment_method");

    let method = body["methodCode"].as_str().unwrap_or("unknown").to_string();
    if state.with_cart(&cart_id, |cart| cart.payment_method = Some(method)) {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// 设置访客邮箱
///
/// POST /cart/:cart_id/set_guest_email
async fn set_guest_email(
    State(state): State<StorefrontState>,
    Path(cart_id): Path<String>,
    Json(req): Json<GuestEmailRequest>,
) -> Result<Json<Value>, StatusCode> {
    state.record_hit("set_guest_email");

    if state.with_cart(&cart_id, |cart| cart.guest_email = Some(req.email)) {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
