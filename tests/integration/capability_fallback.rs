//! Integration tests for capture features when the runtime lacks user media

use super::test_utils::{base_request, with_files};
use attachkit::resolve::{BuildStep, FileTypesBuilder, Slot, StepInputs};
use attachkit::types::{
    AssistantConfig, DefaultFileTypes, FeatureOverride, FileAttachments, FileServiceDefaults,
};
use attachkit::{CapabilityError, FallbackPolicy, FileTypesResolver, StaticCapability};

fn camera_only() -> AssistantConfig {
    AssistantConfig {
        camera: Some(FeatureOverride::Flag(true)),
        ..AssistantConfig::default()
    }
}

#[test]
fn test_camera_without_capability_falls_back_to_images() {
    let resolved = FileTypesResolver::new()
        .with_capability(StaticCapability(false))
        .build(&base_request(), &camera_only(), None)
        .unwrap();

    assert!(resolved.camera.is_none());
    let images = resolved.file_types.images.unwrap();
    assert_eq!(images.files.accepted_formats, "image/*");
}

#[test]
fn test_missing_capability_provider_matches_unavailable() {
    let absent = FileTypesResolver::new()
        .build(&base_request(), &camera_only(), None)
        .unwrap();
    let unavailable = FileTypesResolver::new()
        .with_capability(StaticCapability(false))
        .build(&base_request(), &camera_only(), None)
        .unwrap();
    assert_eq!(absent, unavailable);
}

#[test]
fn test_failing_probe_matches_unavailable() {
    let failing = || -> Result<bool, CapabilityError> { Err(CapabilityError::Unsupported) };
    let assistant = AssistantConfig {
        microphone_audio: Some(with_files(FileAttachments {
            max_number_of_files: Some(2),
            ..FileAttachments::default()
        })),
        ..AssistantConfig::default()
    };

    let resolved = FileTypesResolver::new()
        .with_capability(failing)
        .build(&base_request(), &assistant, None)
        .unwrap();

    assert!(resolved.record_audio.is_none());
    let audio = resolved.file_types.audio.unwrap();
    assert_eq!(audio.files.accepted_formats, "audio/*");
    assert_eq!(audio.files.max_number_of_files, Some(2));
    assert!(audio.request.is_some());
}

#[test]
fn test_configured_images_are_not_overwritten_by_camera_fallback() {
    let assistant = AssistantConfig {
        images: Some(with_files(FileAttachments {
            max_number_of_files: Some(4),
            ..FileAttachments::default()
        })),
        camera: Some(with_files(FileAttachments {
            max_number_of_files: Some(1),
            ..FileAttachments::default()
        })),
        ..AssistantConfig::default()
    };

    let (resolved, trace) = FileTypesResolver::new()
        .with_capability(StaticCapability(false))
        .build_traced(&base_request(), &assistant, None)
        .unwrap();

    assert_eq!(
        resolved.file_types.images.unwrap().files.max_number_of_files,
        Some(4)
    );
    assert_eq!(trace[1].step, BuildStep::Camera);
    assert_eq!(trace[1].written, None);
    assert_eq!(trace[1].user_media, Some(false));
}

#[test]
fn test_fallback_inherits_library_image_defaults() {
    let defaults = DefaultFileTypes {
        images: Some(FileServiceDefaults {
            files: Some(FileAttachments {
                accepted_formats: Some(".png,.jpg".to_string()),
                ..FileAttachments::default()
            }),
        }),
        audio: None,
    };

    // Library defaults populate the images slot, but the assistant did not set
    // images, so camera fallback takes it over while keeping inherited formats.
    let resolved = FileTypesResolver::new()
        .build(&base_request(), &camera_only(), Some(&defaults))
        .unwrap();
    assert_eq!(
        resolved.file_types.images.unwrap().files.accepted_formats,
        ".png,.jpg"
    );
}

#[test]
fn test_slot_unpopulated_policy_keeps_library_default_images() {
    let defaults = DefaultFileTypes {
        images: Some(FileServiceDefaults {
            files: Some(FileAttachments {
                max_number_of_files: Some(6),
                ..FileAttachments::default()
            }),
        }),
        audio: None,
    };
    let assistant = AssistantConfig {
        camera: Some(with_files(FileAttachments {
            max_number_of_files: Some(1),
            ..FileAttachments::default()
        })),
        ..AssistantConfig::default()
    };

    let override_absent = FileTypesResolver::new()
        .build(&base_request(), &assistant, Some(&defaults))
        .unwrap();
    let slot_unpopulated = FileTypesResolver::new()
        .with_fallback_policy(FallbackPolicy::SlotUnpopulated)
        .build(&base_request(), &assistant, Some(&defaults))
        .unwrap();

    assert_eq!(
        override_absent.file_types.images.unwrap().files.max_number_of_files,
        Some(1)
    );
    assert_eq!(
        slot_unpopulated.file_types.images.unwrap().files.max_number_of_files,
        Some(6)
    );
}

#[test]
fn test_steps_can_be_run_one_at_a_time() {
    let assistant = AssistantConfig {
        images: Some(FeatureOverride::Flag(true)),
        camera: Some(FeatureOverride::Flag(true)),
        ..AssistantConfig::default()
    };
    let inputs = StepInputs {
        assistant: &assistant,
        defaults: None,
    };
    let resolver = FileTypesResolver::new().with_capability(StaticCapability(true));

    let builder = FileTypesBuilder::new(base_request());
    let builder = resolver
        .run_step(BuildStep::Images, builder, &inputs)
        .unwrap();
    assert_eq!(builder.resolved().populated_slots(), vec![Slot::Images]);

    let builder = resolver
        .run_step(BuildStep::Camera, builder, &inputs)
        .unwrap();
    assert_eq!(
        builder.resolved().populated_slots(),
        vec![Slot::Images, Slot::Camera]
    );
    assert_eq!(builder.trace().len(), 2);
}

#[test]
fn test_camera_before_images_does_not_inherit() {
    let assistant = AssistantConfig {
        images: Some(with_files(FileAttachments {
            accepted_formats: Some(".gif".to_string()),
            ..FileAttachments::default()
        })),
        camera: Some(FeatureOverride::Flag(true)),
        ..AssistantConfig::default()
    };
    let inputs = StepInputs {
        assistant: &assistant,
        defaults: None,
    };
    let resolver = FileTypesResolver::new().with_capability(StaticCapability(true));

    let builder = resolver
        .run_step(BuildStep::Camera, FileTypesBuilder::new(base_request()), &inputs)
        .unwrap();
    assert_eq!(
        builder.resolved().camera.as_ref().unwrap().files.accepted_formats,
        "image/*"
    );
}
