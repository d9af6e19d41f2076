//! Story content validation integration tests.

use cyoa_engine::core::{LocationId, StoryId};
use cyoa_engine::story::{
    Action, ActionCondition, ContentError, Effect, Location, Story, StoryContent, TriggerAction,
};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Test the first problem is reported, ids before references.
#[test]
fn test_bad_action_id_reported_before_dangling_reference() {
    let hall = new_id();
    let content = StoryContent::new()
        .with_location(Location::new(hall.as_str(), "Hall").offering(ActionCondition::new(new_id())))
        .with_action(Action::new("jump", "Jump"));
    let story = Story::new(StoryId::new(1), "Test");

    let err = content.validate(&story).unwrap_err();
    assert!(matches!(err, ContentError::InvalidActionId { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

/// Test an action trigger moving nowhere is rejected.
#[test]
fn test_action_trigger_to_unknown_location() {
    let hall = new_id();
    let walk = new_id();
    let nowhere = new_id();
    let content = StoryContent::new()
        .with_location(Location::new(hall.as_str(), "Hall"))
        .with_action(
            Action::new(walk.as_str(), "Walk")
                .with_trigger(TriggerAction::new())
                .with_trigger(TriggerAction::new().with_effect(Effect::move_to(nowhere.as_str()))),
        );
    let story = Story::new(StoryId::new(1), "Test");

    match content.validate(&story) {
        Err(ContentError::UnknownEffectLocation { owner, index, target }) => {
            assert_eq!(owner, format!("action {walk}"));
            assert_eq!(index, 1);
            assert_eq!(target, LocationId::new(nowhere));
        }
        other => panic!("Expected UnknownEffectLocation, got {other:?}"),
    }
}

/// Test an offer naming an unknown action is rejected.
#[test]
fn test_unknown_offered_action() {
    let hall = new_id();
    let ghost = new_id();
    let content = StoryContent::new()
        .with_location(Location::new(hall.as_str(), "Hall").offering(ActionCondition::new(ghost.as_str())));
    let story = Story::new(StoryId::new(1), "Test");

    let err = content.validate(&story).unwrap_err();
    assert!(err.to_string().contains(&ghost));
}

/// Test the start location must exist.
#[test]
fn test_unknown_start_location() {
    let content = StoryContent::new().with_location(Location::new(new_id(), "Hall"));
    let elsewhere = new_id();
    let story = Story::new(StoryId::new(9), "Test").starting_at(elsewhere.as_str());

    let err = content.validate(&story).unwrap_err();
    assert!(matches!(err, ContentError::UnknownStartLocation { story: StoryId(9), .. }));
}

/// Test content round-trips through JSON.
#[test]
fn test_content_from_json() {
    let hall = new_id();
    let json = format!(
        r#"{{
            "locations": [{{ "id": "{hall}", "title": "Hall" }}],
            "actions": []
        }}"#
    );
    let content: StoryContent = serde_json::from_str(&json).unwrap();

    assert_eq!(content.locations.len(), 1);
    assert!(content.validate(&Story::new(StoryId::new(1), "Test").starting_at(hall.as_str())).is_ok());
}
