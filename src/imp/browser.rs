use crate::imp::{browser_context::BrowserContext, core::*, prelude::*};

#[derive(Debug)]
pub(crate) struct Browser {
    channel: ChannelOwner,
    version: String,
}

impl Browser {
    pub(crate) fn try_new(channel: ChannelOwner) -> Result<Self, Error> {
        let Initializer { version } = serde_json::from_value(channel.initializer.clone())?;
        Ok(Self { channel, version })
    }

    pub(crate) fn version(&self) -> &str { &self.version }

    pub(crate) async fn new_context(&self) -> ArcResult<Weak<BrowserContext>> {
        let res = self
            .channel
            .send_message("newContext", NewContextArgs::default())
            .await?;
        let guid = guid_at(&res, "context")?;
        let c = get_object!(self.context()?.lock().unwrap(), &guid, BrowserContext)?;
        Ok(c)
    }

    pub(crate) async fn close(&self) -> ArcResult<()> {
        #[skip_serializing_none]
        #[derive(Serialize)]
        struct Args<'a> {
            reason: Option<&'a str>,
        }
        let _ = self.channel.send_message("close", Args { reason: None }).await?;
        Ok(())
    }
}

impl RemoteObject for Browser {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Initializer {
    version: String,
}

// Fields the driver's validator requires on every `newContext`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewContextArgs {
    sdk_language: &'static str,
    selector_engines: Vec<Value>,
    test_id_attribute_name: &'static str,
}

impl Default for NewContextArgs {
    fn default() -> Self {
        Self {
            sdk_language: "javascript",
            selector_engines: Vec::new(),
            test_id_attribute_name: "data-testid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_args_carry_required_fields() {
        let v = serde_json::to_value(NewContextArgs::default()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "sdkLanguage": "javascript",
                "selectorEngines": [],
                "testIdAttributeName": "data-testid"
            })
        );
    }
}
