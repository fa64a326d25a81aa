//! 产品目录处理器
//! 目录是静态数据，直接从内存返回

use crate::{
    error::AppError,
    models::product::{self, Product},
};
use axum::{extract::Query, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub titles: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategorySummary {
    id: &'static str,
    title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<&'static str>,
    product_count: usize,
}

/// GET /api/products
///
/// `?titles=true` 只返回标题列表，`?category=` 按分类过滤，
/// 否则返回全部产品和分类摘要。
pub async fn get_products(
    Query(query): Query<ProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.titles.as_deref() == Some("true") {
        let titles = product::product_titles();
        return Ok(Json(json!({
            "success": true,
            "data": titles,
            "count": titles.len(),
        })));
    }

    if let Some(category_id) = query.category.as_deref() {
        let category = product::category_by_id(category_id)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        return Ok(Json(json!({
            "success": true,
            "data": category.products,
            "category": {
                "id": category.id,
                "title": category.title,
                "badge": category.badge,
            },
            "count": category.products.len(),
        })));
    }

    let products: Vec<Product> = product::all_products();
    let categories: Vec<CategorySummary> = product::CATALOG
        .iter()
        .map(|c| CategorySummary {
            id: c.id,
            title: c.title,
            badge: c.badge,
            product_count: c.products.len(),
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "data": products,
        "categories": categories,
        "count": products.len(),
    })))
}
