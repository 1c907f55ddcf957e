mod connection;
mod driver;
mod message;
mod remote_object;
mod transport;

pub(crate) use self::{connection::*, message::*, remote_object::*, transport::*};
pub use self::{
    connection::Error,
    driver::{Driver, Platform},
    message::{ErrorMessage, Guid},
};
use crate::imp::prelude::*;

pub(crate) fn upgrade<T>(w: &Weak<T>) -> Result<Arc<T>, Error> {
    w.upgrade().ok_or(Error::ObjectNotFound)
}

macro_rules! get_object {
    ($ctx:expr, $guid:expr, $t:ident) => {
        match $ctx.find_object($guid) {
            Some(RemoteArc::$t(x)) => Ok(Arc::downgrade(&x)),
            _ => Err(Error::ObjectNotFound),
        }
    };
}
