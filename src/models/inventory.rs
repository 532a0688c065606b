use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub stock: i32,
    pub unit: Option<String>,
    pub threshold: i32,
    pub location: Option<String>,
    pub status: String,
    pub last_order_date: Option<NaiveDate>,
    pub cost_per_unit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for InventoryItem {
    const TABLE: &'static str = "inventory";
    const ORDER_BY: &'static str = "name ASC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    pub unit: Option<String>,
    #[validate(range(min = 0, message = "Threshold cannot be negative"))]
    pub threshold: Option<i32>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub last_order_date: Option<NaiveDate>,
    pub cost_per_unit: Option<Decimal>,
}

impl InsertRow for CreateInventoryItem {
    fn columns() -> &'static [&'static str] {
        &[
            "name",
            "category",
            "stock",
            "unit",
            "threshold",
            "location",
            "status",
            "last_order_date",
            "cost_per_unit",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.category.clone());
        row.push_bind(self.stock.unwrap_or(0));
        row.push_bind(self.unit.clone());
        row.push_bind(self.threshold.unwrap_or(0));
        row.push_bind(self.location.clone());
        row.push_bind(
            self.status
                .clone()
                .unwrap_or_else(|| "In Stock".to_string()),
        );
        row.push_bind(self.last_order_date);
        row.push_bind(self.cost_per_unit);
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateInventoryItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    pub unit: Option<String>,
    #[validate(range(min = 0, message = "Threshold cannot be negative"))]
    pub threshold: Option<i32>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub last_order_date: Option<NaiveDate>,
    pub cost_per_unit: Option<Decimal>,
}

impl SparseUpdate for UpdateInventoryItem {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.category {
            set.push("category = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.stock {
            set.push("stock = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.unit {
            set.push("unit = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.threshold {
            set.push("threshold = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.location {
            set.push("location = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.status {
            set.push("status = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.last_order_date {
            set.push("last_order_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.cost_per_unit {
            set.push("cost_per_unit = ").push_bind_unseparated(v);
        }
    }
}
