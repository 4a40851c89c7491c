use crate::entities::coupon_entity as coupons;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, EventBus};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct CouponService {
    pool: DatabaseConnection,
    events: EventBus,
}

impl CouponService {
    pub fn new(pool: DatabaseConnection, events: EventBus) -> Self {
        Self { pool, events }
    }

    pub async fn add(&self, code: &str, discount_percentage: i64) -> AppResult<coupons::Model> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::ValidationError("Coupon code is empty".to_string()));
        }
        if !(1..=100).contains(&discount_percentage) {
            return Err(AppError::ValidationError(
                "Discount must be between 1 and 100 percent".to_string(),
            ));
        }

        let coupon = coupons::ActiveModel {
            code: Set(code),
            discount_percentage: Set(discount_percentage),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let coupon = coupon.insert(&self.pool).await?;
        self.events.publish(ChangeEvent::CouponsChanged);
        Ok(coupon)
    }

    pub async fn update(&self, coupon: coupons::Model) -> AppResult<coupons::Model> {
        let code = coupon.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::ValidationError("Coupon code is empty".to_string()));
        }
        if !(1..=100).contains(&coupon.discount_percentage) {
            return Err(AppError::ValidationError(
                "Discount must be between 1 and 100 percent".to_string(),
            ));
        }
        coupons::Entity::find_by_id(coupon.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("coupon {}", coupon.id)))?;

        let model = coupons::ActiveModel {
            id: Set(coupon.id),
            code: Set(code),
            discount_percentage: Set(coupon.discount_percentage),
            created_at: Set(coupon.created_at),
        };
        let updated = model.update(&self.pool).await?;
        self.events.publish(ChangeEvent::CouponsChanged);
        Ok(updated)
    }

    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<coupons::Model>> {
        let coupon = coupons::Entity::find()
            .filter(coupons::Column::Code.eq(code.trim().to_uppercase()))
            .one(&self.pool)
            .await?;
        Ok(coupon)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let coupon = coupons::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("coupon {id}")))?;
        coupon.delete(&self.pool).await?;
        self.events.publish(ChangeEvent::CouponsChanged);
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<coupons::Model>> {
        let rows = coupons::Entity::find()
            .order_by_desc(coupons::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}
