use circle_track::farmware::{ConsoleLog, MessageKind, MessageLog, celery_payload};

#[test]
fn payload_matches_the_celery_script_shape() -> anyhow::Result<()> {
    let payload = serde_json::to_value(celery_payload("Problem getting image.", MessageKind::Error))?;
    assert_eq!(
        payload,
        serde_json::json!({
            "kind": "send_message",
            "args": {
                "message": "[circle-track] Problem getting image.",
                "message_type": "error"
            }
        })
    );
    Ok(())
}

#[test]
fn message_kinds_map_to_host_tags() {
    assert_eq!(MessageKind::Info.as_str(), "info");
    assert_eq!(MessageKind::Warning.as_str(), "warning");
    assert_eq!(MessageKind::Error.as_str(), "error");
}

#[test]
fn console_log_never_fails() {
    let log = ConsoleLog;
    assert!(log.log("standalone run", MessageKind::Info).is_ok());
    assert!(log.log("standalone run", MessageKind::Error).is_ok());
}
