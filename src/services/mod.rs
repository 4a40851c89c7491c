pub mod activity_service;
pub mod auth_service;
pub mod coupon_service;
pub mod dashboard_service;
pub mod exercise_service;
pub mod food_service;
pub mod message_service;
pub mod session_service;
pub mod settings_service;
pub mod user_service;

pub use activity_service::ActivityService;
pub use auth_service::AuthService;
pub use coupon_service::CouponService;
pub use dashboard_service::DashboardService;
pub use exercise_service::ExerciseService;
pub use food_service::FoodService;
pub use message_service::MessageService;
pub use session_service::SessionService;
pub use settings_service::SettingsService;
pub use user_service::UserService;
