/// Builder setters over an `args` struct whose fields are all `Option`.
/// Each field gets `field(x)` and `clear_field()`.
macro_rules! setter {
    ($($(#[$attr:meta])* $field:ident: Option<$t:ty>),+ $(,)?) => {
        paste::paste! {
            $(
                $(#[$attr])*
                #[allow(clippy::wrong_self_convention)]
                pub fn $field(mut self, x: $t) -> Self {
                    self.args.$field = Some(x);
                    self
                }

                pub fn [<clear_ $field>](mut self) -> Self {
                    self.args.$field = None;
                    self
                }
            )+
        }
    };
}

pub mod browser;
pub mod browser_type;
pub mod frame;
pub mod locator;
pub mod page;
pub mod playwright;

pub use crate::imp::utils::*;

pub use self::playwright::Playwright;
pub use browser::Browser;
pub use browser_type::BrowserType;
pub use frame::Frame;
pub use locator::Locator;
pub use page::Page;
