// Business logic services

pub mod activity_service;
pub mod calendar_service;
pub mod checklist_service;
pub mod goal_service;
pub mod physical_service;
pub mod profession_service;
pub mod quote_service;
pub mod reminder_service;
pub mod task_service;
pub mod user_service;

pub use activity_service::ActivityService;
pub use calendar_service::CalendarService;
pub use checklist_service::ChecklistService;
pub use goal_service::GoalService;
pub use physical_service::PhysicalService;
pub use profession_service::ProfessionService;
pub use quote_service::QuoteService;
pub use reminder_service::ReminderService;
pub use task_service::TaskService;
pub use user_service::UserService;
