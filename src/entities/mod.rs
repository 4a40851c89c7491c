pub mod coupons;
pub mod custom_cards;
pub mod dashboard_posts;
pub mod exercises;
pub mod food_items;
pub mod login_activities;
pub mod messages;
pub mod sections;
pub mod sessions;
pub mod settings;
pub mod users;

pub use coupons as coupon_entity;
pub use custom_cards as custom_card_entity;
pub use dashboard_posts as dashboard_post_entity;
pub use exercises as exercise_entity;
pub use food_items as food_item_entity;
pub use login_activities as login_activity_entity;
pub use messages as message_entity;
pub use sections as section_entity;
pub use sessions as session_entity;
pub use settings as setting_entity;
pub use users as user_entity;
