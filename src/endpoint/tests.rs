use super::*;

#[test]
fn test_error_codes_match_wire_values() {
    assert_eq!(ComError::Generic.code(), 0x01);
    assert_eq!(ComError::BrokerNotReachable.code(), 0x02);
    assert_eq!(ComError::TopicTooLong.code(), 0x11);
    assert_eq!(ComError::InvalidTopic.code(), 0x12);
    assert_eq!(ComError::TopicAlreadySubscribed.code(), 0x13);
}

#[test]
fn test_from_code_inverts_code() {
    for err in [
        ComError::Generic,
        ComError::BrokerNotReachable,
        ComError::TopicTooLong,
        ComError::InvalidTopic,
        ComError::TopicAlreadySubscribed,
    ] {
        assert_eq!(ComError::from_code(err.code()), Some(err));
    }
    assert_eq!(ComError::from_code(NO_ERROR), None);
    assert_eq!(ComError::from_code(0x42), None);
}

#[test]
fn test_result_code() {
    assert_eq!(result_code(&Ok(())), NO_ERROR);
    assert_eq!(result_code(&Err(ComError::InvalidTopic)), 0x12);
}
