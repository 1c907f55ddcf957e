use crate::imp::{core::*, page::Page, prelude::*};

#[derive(Debug)]
pub(crate) struct BrowserContext {
    channel: ChannelOwner,
}

impl BrowserContext {
    pub(crate) fn try_new(channel: ChannelOwner) -> Result<Self, Error> { Ok(Self { channel }) }

    pub(crate) async fn new_page(&self) -> ArcResult<Weak<Page>> {
        let res = self.channel.send_message("newPage", Map::new()).await?;
        let guid = guid_at(&res, "page")?;
        let p = get_object!(self.context()?.lock().unwrap(), &guid, Page)?;
        Ok(p)
    }
}

impl RemoteObject for BrowserContext {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}
