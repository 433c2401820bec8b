pub mod driver;
pub mod page;
pub mod session;
pub mod settle;

pub use driver::create_webdriver_client;
pub use page::{KeyTarget, Page, Selector, WebDriverPage};
pub use session::{MenuItem, SessionController};
pub use settle::Settle;
