use crate::imp::{
    browser::Browser, browser_context::BrowserContext, browser_type::BrowserType, core::*,
    frame::Frame, page::Page, playwright::Playwright, prelude::*,
};

#[derive(Debug)]
pub(crate) struct ChannelOwner {
    pub(crate) ctx: Wm<Context>,
    pub(crate) parent: Option<Guid>,
    pub(crate) typ: String,
    pub(crate) guid: Guid,
    pub(crate) initializer: Value,
}

impl ChannelOwner {
    pub(crate) fn new(
        ctx: Wm<Context>,
        parent: Guid,
        typ: String,
        guid: Guid,
        initializer: Value,
    ) -> Self {
        Self {
            ctx,
            parent: Some(parent),
            typ,
            guid,
            initializer,
        }
    }

    fn new_root() -> Self {
        Self {
            ctx: Weak::new(),
            parent: None,
            typ: String::new(),
            guid: Guid::root(),
            initializer: Value::default(),
        }
    }

    /// Calls `method` on this object and waits for the driver's answer.
    pub(crate) async fn send_message<A: Serialize>(
        &self,
        method: &str,
        args: A,
    ) -> ArcResult<Arc<Value>> {
        let params = match serde_json::to_value(args).map_err(Error::Serde)? {
            Value::Object(m) => m,
            Value::Null => Map::new(),
            _ => return Err(Error::NotObject.into()),
        };
        let rx = {
            let ctx = upgrade(&self.ctx)?;
            let mut ctx = ctx.lock().unwrap();
            ctx.send_message(&self.guid, method, params)?
        };
        let res = rx.await.map_err(|_| Error::ReceiverClosed)??;
        res.map_err(|e| Arc::new(Error::ErrorResponded(e)))
    }
}

pub(crate) trait RemoteObject {
    fn channel(&self) -> &ChannelOwner;

    fn guid(&self) -> &Guid { &self.channel().guid }

    fn context(&self) -> Result<Am<Context>, Error> { upgrade(&self.channel().ctx) }

    fn handle_event(
        &self,
        _ctx: &Context,
        _method: &str,
        _params: Map<String, Value>,
    ) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct RootObject {
    channel: ChannelOwner,
}

impl RootObject {
    pub(crate) fn new() -> Self {
        Self {
            channel: ChannelOwner::new_root(),
        }
    }
}

impl RemoteObject for RootObject {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

/// Objects the driver creates that nothing here talks to (responses, request contexts, ...).
#[derive(Debug)]
pub(crate) struct DummyObject {
    channel: ChannelOwner,
}

impl RemoteObject for DummyObject {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[derive(Debug, Clone)]
pub(crate) enum RemoteArc {
    Root(Arc<RootObject>),
    Dummy(Arc<DummyObject>),
    Playwright(Arc<Playwright>),
    BrowserType(Arc<BrowserType>),
    Browser(Arc<Browser>),
    BrowserContext(Arc<BrowserContext>),
    Page(Arc<Page>),
    Frame(Arc<Frame>),
}

macro_rules! upcast {
    ($e:expr, $x:ident => $body:expr) => {
        match $e {
            RemoteArc::Root($x) => $body,
            RemoteArc::Dummy($x) => $body,
            RemoteArc::Playwright($x) => $body,
            RemoteArc::BrowserType($x) => $body,
            RemoteArc::Browser($x) => $body,
            RemoteArc::BrowserContext($x) => $body,
            RemoteArc::Page($x) => $body,
            RemoteArc::Frame($x) => $body,
        }
    };
}

impl RemoteArc {
    pub(crate) fn try_new(typ: &str, ctx: &Context, c: ChannelOwner) -> Result<Self, Error> {
        Ok(match typ {
            "Playwright" => RemoteArc::Playwright(Arc::new(Playwright::try_new(ctx, c)?)),
            "BrowserType" => RemoteArc::BrowserType(Arc::new(BrowserType::try_new(c)?)),
            "Browser" => RemoteArc::Browser(Arc::new(Browser::try_new(c)?)),
            "BrowserContext" => RemoteArc::BrowserContext(Arc::new(BrowserContext::try_new(c)?)),
            "Page" => RemoteArc::Page(Arc::new(Page::try_new(ctx, c)?)),
            "Frame" => RemoteArc::Frame(Arc::new(Frame::try_new(c)?)),
            _ => RemoteArc::Dummy(Arc::new(DummyObject { channel: c })),
        })
    }

    pub(crate) fn channel(&self) -> &ChannelOwner { upcast!(self, x => x.channel()) }

    pub(crate) fn handle_event(
        &self,
        ctx: &Context,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<(), Error> {
        upcast!(self, x => x.handle_event(ctx, method, params))
    }
}
