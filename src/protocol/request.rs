/// Arguments of an outgoing DATA, START, STOP, DO or DONE message.
///
/// Which fields matter depends on the message kind:
///
/// | kind  | `device_id`          | `data_id`   | `data`          |
/// |-------|----------------------|-------------|-----------------|
/// | DATA  | unused               | data field  | value           |
/// | START | device to request    | data field  | unused          |
/// | STOP  | device to request    | data field  | unused          |
/// | DO    | device to command    | command     | settings        |
/// | DONE  | unused               | command     | result          |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubRequest {
    pub device_id: String,
    pub data_id: String,
    pub data: String,
}

impl PubRequest {
    /// Request addressed at the publishing device itself (DATA, DONE).
    pub fn own(data_id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            device_id: String::new(),
            data_id: data_id.into(),
            data: data.into(),
        }
    }

    /// Request addressed at another device (START, STOP, DO).
    pub fn to(
        device_id: impl Into<String>,
        data_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            data_id: data_id.into(),
            data: data.into(),
        }
    }
}

/// Arguments of a subscribe or unsubscribe call.
///
/// `target_id` names the observed device for STATUS, DATA and DONE and is
/// ignored for START, STOP and DO, which always listen on the own device.
/// `data_id` is ignored for STATUS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubRequest {
    pub target_id: String,
    pub data_id: String,
}

impl SubRequest {
    pub fn new(target_id: impl Into<String>, data_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            data_id: data_id.into(),
        }
    }

    pub fn target(target_id: impl Into<String>) -> Self {
        Self::new(target_id, "")
    }

    pub fn own(data_id: impl Into<String>) -> Self {
        Self::new("", data_id)
    }
}
