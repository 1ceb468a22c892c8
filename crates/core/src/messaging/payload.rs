//! Message payload builders
//!
//! Each message carries a numeric `messageType` discriminator. Text
//! messages put the content in `body`; resource messages put the resource
//! id in a kind-specific `messageDetail` record.

use psnlink_domain::constants::{
    CONTENT_TYPE_JSON, CONTENT_TYPE_JSON_UTF8, MESSAGE_TYPE_IMAGE, MESSAGE_TYPE_STICKER,
    MESSAGE_TYPE_TEXT, STICKER_MANIFEST_URL, STICKER_NUMBER, STICKER_PACKAGE_ID, STICKER_TYPE,
};
use psnlink_domain::{PsnError, ResourceKind, Result};
use serde::Serialize;

/// JSON body of a thread message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub message_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_detail: Option<MessageDetail>,
}

impl MessagePayload {
    /// Resource id referenced by the payload, whichever detail record holds it.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        match self.message_detail.as_ref()? {
            MessageDetail::Image(detail) => Some(&detail.resource_id),
            MessageDetail::Sticker(detail) => Some(&detail.image_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MessageDetail {
    #[serde(rename = "imageMessageDetail")]
    Image(ImageMessageDetail),
    #[serde(rename = "stickerMessageDetail")]
    Sticker(StickerMessageDetail),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessageDetail {
    pub resource_id: String,
}

/// Preset sticker reference. The remote expects the uploaded resource id
/// in `imageUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessageDetail {
    pub image_url: String,
    pub manifest_file_url: String,
    pub number: String,
    pub package_id: String,
    #[serde(rename = "type")]
    pub sticker_type: String,
}

/// A payload together with the content type it must be posted with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub payload: MessagePayload,
    pub content_type: &'static str,
}

impl OutboundMessage {
    /// Serialized JSON body.
    ///
    /// # Errors
    /// Returns `InvalidInput` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.payload)
            .map_err(|e| PsnError::InvalidInput(format!("failed to encode message: {e}")))
    }
}

/// Plain text message.
#[must_use]
pub fn text_message(text: &str) -> OutboundMessage {
    OutboundMessage {
        payload: MessagePayload {
            message_type: MESSAGE_TYPE_TEXT,
            body: Some(text.to_string()),
            message_detail: None,
        },
        content_type: CONTENT_TYPE_JSON,
    }
}

/// Message referencing an uploaded resource.
///
/// # Errors
/// Returns `UnsupportedVariant` for kinds without transfer semantics
/// (`Video`, `Audio`, `Link`). No payload is produced for those.
pub fn resource_message(kind: ResourceKind, resource_id: &str) -> Result<OutboundMessage> {
    match kind {
        ResourceKind::Image => Ok(OutboundMessage {
            payload: MessagePayload {
                message_type: MESSAGE_TYPE_IMAGE,
                body: None,
                message_detail: Some(MessageDetail::Image(ImageMessageDetail {
                    resource_id: resource_id.to_string(),
                })),
            },
            content_type: CONTENT_TYPE_JSON_UTF8,
        }),
        ResourceKind::Sticker => Ok(OutboundMessage {
            payload: MessagePayload {
                message_type: MESSAGE_TYPE_STICKER,
                body: None,
                message_detail: Some(MessageDetail::Sticker(StickerMessageDetail {
                    image_url: resource_id.to_string(),
                    manifest_file_url: STICKER_MANIFEST_URL.to_string(),
                    number: STICKER_NUMBER.to_string(),
                    package_id: STICKER_PACKAGE_ID.to_string(),
                    sticker_type: STICKER_TYPE.to_string(),
                })),
            },
            content_type: CONTENT_TYPE_JSON,
        }),
        ResourceKind::Video | ResourceKind::Audio | ResourceKind::Link => {
            Err(PsnError::UnsupportedVariant(format!("sending {kind} resources is not supported")))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_message_wire_shape() {
        let message = text_message("hello");
        let value = serde_json::to_value(&message.payload).expect("json");
        assert_eq!(value, json!({ "messageType": 1, "body": "hello" }));
        assert_eq!(message.content_type, "application/json");
    }

    #[test]
    fn image_message_wire_shape() {
        let message = resource_message(ResourceKind::Image, "res-1").expect("image");
        let value = serde_json::to_value(&message.payload).expect("json");
        assert_eq!(
            value,
            json!({
                "messageType": 3,
                "messageDetail": { "imageMessageDetail": { "resourceId": "res-1" } }
            })
        );
        assert_eq!(message.content_type, "application/json; charset=utf-8");
    }

    #[test]
    fn sticker_message_wire_shape() {
        let message = resource_message(ResourceKind::Sticker, "res-2").expect("sticker");
        let value = serde_json::to_value(&message.payload).expect("json");
        let detail = &value["messageDetail"]["stickerMessageDetail"];
        assert_eq!(value["messageType"], 1013);
        assert_eq!(detail["imageUrl"], "res-2");
        assert_eq!(detail["number"], "03");
        assert_eq!(detail["packageId"], "PRESET0000000002");
        assert_eq!(detail["type"], "preset");
        assert!(detail["manifestFileUrl"].as_str().expect("url").ends_with("manifest.json"));
    }

    #[test]
    fn image_and_sticker_differ_in_discriminator_but_share_resource_id() {
        let image = resource_message(ResourceKind::Image, "same-id").expect("image");
        let sticker = resource_message(ResourceKind::Sticker, "same-id").expect("sticker");

        assert_ne!(image.payload.message_type, sticker.payload.message_type);
        assert_eq!(image.payload.resource_id(), Some("same-id"));
        assert_eq!(sticker.payload.resource_id(), Some("same-id"));
    }

    #[test]
    fn other_kinds_are_unsupported() {
        for kind in [ResourceKind::Video, ResourceKind::Audio, ResourceKind::Link] {
            let err = resource_message(kind, "id").expect_err("unsupported");
            assert!(matches!(err, PsnError::UnsupportedVariant(_)), "{kind} should be unsupported");
        }
    }
}
