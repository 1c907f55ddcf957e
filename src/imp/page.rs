use crate::imp::{core::*, frame::Frame, prelude::*, utils::ScreenshotType};
use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug)]
pub(crate) struct Page {
    channel: ChannelOwner,
    main_frame: Weak<Frame>,
}

impl Page {
    pub(crate) fn try_new(ctx: &Context, channel: ChannelOwner) -> Result<Self, Error> {
        let Initializer {
            main_frame: OnlyGuid { guid },
        } = serde_json::from_value(channel.initializer.clone())?;
        let main_frame = get_object!(ctx, &guid, Frame)?;
        Ok(Self {
            channel,
            main_frame,
        })
    }

    pub(crate) fn main_frame(&self) -> Weak<Frame> { self.main_frame.clone() }

    pub(crate) async fn screenshot(&self, mut args: ScreenshotArgs) -> ArcResult<Vec<u8>> {
        args.timeout = Some(args.timeout.unwrap_or(Frame::DEFAULT_TIMEOUT));
        let v = self.channel.send_message("screenshot", args).await?;
        let b64 = v
            .get("binary")
            .and_then(Value::as_str)
            .ok_or(Error::InvalidParams)?;
        let bytes = STANDARD.decode(b64).map_err(Error::InvalidBase64)?;
        Ok(bytes)
    }
}

impl RemoteObject for Page {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Initializer {
    main_frame: OnlyGuid,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScreenshotArgs {
    pub(crate) timeout: Option<f64>,
    pub(crate) r#type: Option<ScreenshotType>,
}
