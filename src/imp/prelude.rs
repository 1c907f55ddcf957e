pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use serde_json::{map::Map, value::Value};
pub(crate) use serde_with::skip_serializing_none;
pub(crate) use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, Weak},
};

pub(crate) type Wm<T> = Weak<Mutex<T>>;
pub(crate) type Am<T> = Arc<Mutex<T>>;
