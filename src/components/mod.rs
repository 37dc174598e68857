//! UI Components
//!
//! Reusable Leptos components for the dashboards.

pub mod contribution_form;
pub mod loading;
pub mod loan_form;
pub mod modal;
pub mod nav;
pub mod stat_card;
pub mod table;
pub mod toast;

pub use contribution_form::ContributionForm;
pub use loading::{CardSkeleton, ListSkeleton, Loading};
pub use loan_form::LoanRequestForm;
pub use modal::Modal;
pub use nav::Nav;
pub use stat_card::StatCard;
pub use table::Paginator;
pub use toast::Toast;
