//! UI Components
//!
//! Reusable Leptos components.

mod nav_bar;
mod notification_badge;
mod toast_host;
mod confirm_button;
mod dashboard;
mod case_list;
mod case_docket;
mod presence_bar;
mod filter_bar;
mod deadline_list;
mod deadline_row;
mod calendar_view;
mod chat_panel;
mod assistant_page;
mod health_dashboard;

pub use nav_bar::NavBar;
pub use notification_badge::NotificationBadge;
pub use toast_host::ToastHost;
pub use confirm_button::ConfirmButton;
pub use dashboard::Dashboard;
pub use case_list::CaseList;
pub use case_docket::CaseDocket;
pub use presence_bar::PresenceBar;
pub use filter_bar::FilterBar;
pub use deadline_list::DeadlineList;
pub use deadline_row::DeadlineRow;
pub use calendar_view::CalendarView;
pub use chat_panel::ChatPanel;
pub use assistant_page::AssistantPage;
pub use health_dashboard::HealthDashboard;
