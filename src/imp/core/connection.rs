use crate::imp::{core::*, prelude::*};
use std::{
    io,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::oneshot;

pub(crate) type WaitMessageResult = Result<Result<Arc<Value>, Arc<ErrorMessage>>, Arc<Error>>;

#[derive(Debug)]
pub(crate) struct Context {
    objects: HashMap<Guid, RemoteArc>,
    ctx: Wm<Context>,
    id: i32,
    callbacks: HashMap<i32, oneshot::Sender<WaitMessageResult>>,
    writer: Writer<ChildStdin>,
    closed: Option<Arc<Error>>,
}

/// Owns the driver process. Dropping it kills the driver, which takes its browsers down with it.
#[derive(Debug)]
pub(crate) struct Connection {
    child: Child,
    ctx: Am<Context>,
    should_stop: Arc<AtomicBool>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to initialize")]
    InitializationError,
    #[error("Disconnected")]
    ReceiverClosed,
    #[error("Invalid message")]
    InvalidParams,
    #[error("Object not found")]
    ObjectNotFound,
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    ErrorResponded(#[from] Arc<ErrorMessage>),
    #[error("Value is not Object")]
    NotObject,
    #[error("guid not found in {0:?}")]
    GuidNotFound(Value),
    #[error(transparent)]
    InvalidBase64(#[from] base64::DecodeError),
    #[error(transparent)]
    Arc(#[from] Arc<Error>),
    #[error("Timed out")]
    Timeout,
}

pub(crate) type ArcResult<T> = Result<T, Arc<Error>>;

impl Error {
    /// Whether the driver gave up waiting, as opposed to failing outright.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::ErrorResponded(e) => e.is_timeout(),
            Self::Arc(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.should_stop.store(true, Ordering::Relaxed);
        if let Ok(mut ctx) = self.ctx.lock() {
            ctx.notify_closed(Error::ReceiverClosed);
        }
        if let Err(e) = self.child.kill() {
            log::trace!("driver already exited: {:?}", e);
        }
        let _ = self.child.wait();
    }
}

impl Connection {
    pub(crate) fn run(exec: &Path) -> io::Result<Connection> {
        let mut child = Command::new(exec)
            .arg("run-driver")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                let _ = child.kill();
                return Err(io::Error::other("driver pipes are not available"));
            }
        };
        let conn = Self {
            child,
            ctx: Context::new(Writer::new(stdin)),
            should_stop: Arc::new(false.into()),
        };
        conn.start(Reader::new(stdout));
        Ok(conn)
    }

    fn start(&self, mut reader: Reader<ChildStdout>) {
        let c = Arc::downgrade(&self.ctx);
        let s = Arc::clone(&self.should_stop);
        std::thread::spawn(move || {
            log::trace!("reader thread started");
            let status = (|| -> Result<(), Error> {
                loop {
                    let response = reader.read_message()?;
                    if s.load(Ordering::Relaxed) {
                        break;
                    }
                    let c = match c.upgrade() {
                        Some(x) => x,
                        None => break,
                    };
                    let mut ctx = c.lock().unwrap();
                    if let Err(e) = ctx.dispatch(response) {
                        log::error!("dispatch failed: {:?}", e);
                    }
                }
                Ok(())
            })();
            match status {
                Err(e) => {
                    log::trace!("Failed with {:?}", e);
                    if let Some(c) = c.upgrade() {
                        c.lock().unwrap().notify_closed(e);
                    }
                }
                Ok(()) => log::trace!("Done"),
            }
        });
    }

    pub(crate) fn context(&self) -> Wm<Context> { Arc::downgrade(&self.ctx) }

    pub(crate) fn send_initialize(&self) -> Result<oneshot::Receiver<WaitMessageResult>, Error> {
        let mut params = Map::new();
        params.insert("sdkLanguage".into(), "javascript".into());
        self.ctx
            .lock()
            .unwrap()
            .send_message(&Guid::root(), "initialize", params)
    }
}

impl Context {
    fn new(writer: Writer<ChildStdin>) -> Am<Context> {
        let objects = {
            let mut d = HashMap::new();
            let root = RootObject::new();
            d.insert(root.guid().to_owned(), RemoteArc::Root(Arc::new(root)));
            d
        };
        let ctx = Context {
            objects,
            ctx: Weak::new(),
            id: 0,
            callbacks: HashMap::new(),
            writer,
            closed: None,
        };
        let am = Arc::new(Mutex::new(ctx));
        am.lock().unwrap().ctx = Arc::downgrade(&am);
        am
    }

    fn notify_closed(&mut self, e: Error) {
        if self.closed.is_some() {
            return;
        }
        let err = Arc::new(e);
        for (_, tx) in self.callbacks.drain() {
            let _ = tx.send(Err(err.clone()));
        }
        self.closed = Some(err);
        self.objects = HashMap::new();
    }

    fn dispatch(&mut self, msg: Res) -> Result<(), Error> {
        let msg = match msg {
            Res::Result(msg) => {
                let tx = self.callbacks.remove(&msg.id).ok_or(Error::InvalidParams)?;
                let body = msg.into_body().map(Arc::new).map_err(Arc::new);
                let _ = tx.send(Ok(body));
                return Ok(());
            }
            Res::Event(msg) => msg,
        };
        let ResEvent {
            guid,
            method,
            params,
        } = msg;
        let params = params.unwrap_or_default();
        match method.as_str() {
            "__create__" => self.create_remote_object(&guid, params),
            "__dispose__" => {
                self.dispose(&guid);
                Ok(())
            }
            "__adopt__" => Ok(()),
            _ => {
                let target = self.find_object(&guid).ok_or(Error::ObjectNotFound)?;
                target.handle_event(self, &method, params)
            }
        }
    }

    fn create_remote_object(
        &mut self,
        parent: &Guid,
        params: Map<String, Value>,
    ) -> Result<(), Error> {
        let CreateParams {
            typ,
            guid,
            initializer,
        } = serde_json::from_value(params.into())?;
        log::trace!(
            "create_remote_object typ={} guid={} parent={}",
            typ,
            guid,
            parent
        );
        if !self.objects.contains_key(parent) {
            return Err(Error::ObjectNotFound);
        }
        let c = ChannelOwner::new(
            self.ctx.clone(),
            parent.to_owned(),
            typ.to_owned(),
            guid.to_owned(),
            initializer,
        );
        let r = RemoteArc::try_new(&typ, self, c)?;
        self.objects.insert(guid, r);
        Ok(())
    }

    fn dispose(&mut self, guid: &Guid) {
        let children: Vec<Guid> = self
            .objects
            .iter()
            .filter(|(_, o)| o.channel().parent.as_ref() == Some(guid))
            .map(|(k, _)| k.to_owned())
            .collect();
        for c in children {
            self.dispose(&c);
        }
        self.objects.remove(guid);
    }

    pub(in crate::imp) fn find_object(&self, k: &Guid) -> Option<RemoteArc> {
        self.objects.get(k).cloned()
    }

    pub(in crate::imp) fn send_message(
        &mut self,
        guid: &Guid,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<oneshot::Receiver<WaitMessageResult>, Error> {
        if let Some(e) = &self.closed {
            return Err(Error::Arc(e.clone()));
        }
        self.id += 1;
        let (tx, rx) = oneshot::channel();
        self.callbacks.insert(self.id, tx);
        let req = Req {
            guid,
            method,
            params,
            metadata: Metadata::default(),
            id: self.id,
        };
        if let Err(e) = self.writer.send(&req) {
            self.callbacks.remove(&self.id);
            return Err(e.into());
        }
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_classified() {
        let responded = Error::ErrorResponded(Arc::new(ErrorMessage {
            name: "TimeoutError".into(),
            message: "Timeout 5000ms exceeded.".into(),
            ..ErrorMessage::default()
        }));
        assert!(responded.is_timeout());
        assert!(Error::Arc(Arc::new(responded)).is_timeout());
        assert!(Error::Timeout.is_timeout());
        assert!(!Error::ReceiverClosed.is_timeout());
        let other = Error::ErrorResponded(Arc::new(ErrorMessage {
            name: "Error".into(),
            message: "net::ERR_CONNECTION_REFUSED".into(),
            ..ErrorMessage::default()
        }));
        assert!(!other.is_timeout());
    }

    crate::runtime_test!(initialize, {
        let driver = match Driver::install() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("driver unavailable ({e:?}); skipping");
                return;
            }
        };
        let conn = Connection::run(&driver.executable()).unwrap();
        let rx = conn.send_initialize().unwrap();
        let res = tokio::time::timeout(std::time::Duration::from_secs(30), rx).await;
        let body = match res {
            Ok(Ok(Ok(Ok(body)))) => body,
            other => {
                eprintln!("initialize did not complete ({other:?}); skipping");
                return;
            }
        };
        assert!(guid_at(&body, "playwright").is_ok());
    });
}
