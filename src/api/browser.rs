use crate::{
    api::Page,
    imp::{browser::Browser as Impl, core::*, prelude::*},
};

/// A browser launched by [`Launcher::launch`](crate::api::browser_type::Launcher::launch).
#[derive(Debug, Clone)]
pub struct Browser {
    inner: Weak<Impl>,
}

impl PartialEq for Browser {
    fn eq(&self, other: &Self) -> bool {
        let a = self.inner.upgrade();
        let b = other.inner.upgrade();
        a.and_then(|a| b.map(|b| (a, b)))
            .map(|(a, b)| a.guid() == b.guid())
            .unwrap_or_default()
    }
}

impl Browser {
    pub(crate) fn new(inner: Weak<Impl>) -> Self { Self { inner } }

    /// Returns the browser version.
    pub fn version(&self) -> Result<String, Error> { Ok(upgrade(&self.inner)?.version().to_owned()) }

    /// Creates a page in a fresh browser context. Closing the browser closes both.
    pub async fn new_page(&self) -> ArcResult<Page> {
        let context = upgrade(&self.inner)?.new_context().await?;
        let page = upgrade(&context)?.new_page().await?;
        Ok(Page::new(page))
    }

    /// Closes the browser and all of its pages. The [`Browser`] object itself is considered
    /// disposed and cannot be used anymore.
    pub async fn close(&self) -> ArcResult<()> {
        let inner = match self.inner.upgrade() {
            None => return Ok(()),
            Some(inner) => inner,
        };
        inner.close().await
    }
}
