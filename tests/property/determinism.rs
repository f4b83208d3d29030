//! Property-based tests for determinism and slot independence

use attachkit::types::{
    AssistantConfig, FeatureOverride, FileAttachments, FilesServiceConfig, RequestOverride,
    RequestSettings,
};
use attachkit::{FileTypesResolver, StaticCapability};
use proptest::option;
use proptest::prelude::*;

fn files_strategy() -> impl Strategy<Value = FileAttachments> {
    (
        option::of(prop_oneof![
            Just(String::new()),
            Just(".png".to_string()),
            Just("audio/*".to_string()),
        ]),
        option::of(0u32..5),
        option::of(Just("jpeg".to_string())),
        option::of(1u32..60),
    )
        .prop_map(
            |(accepted_formats, max_number_of_files, format, max_duration_seconds)| {
                FileAttachments {
                    accepted_formats,
                    max_number_of_files,
                    format,
                    max_duration_seconds,
                    ..FileAttachments::default()
                }
            },
        )
}

fn request_strategy() -> impl Strategy<Value = RequestOverride> {
    (
        option::of(prop_oneof![Just(String::new()), Just("PUT".to_string())]),
        option::of(Just("/override".to_string())),
    )
        .prop_map(|(method, url)| RequestOverride {
            method,
            url,
            headers: None,
        })
}

fn feature_strategy() -> impl Strategy<Value = Option<FeatureOverride>> {
    prop_oneof![
        Just(None::<FeatureOverride>),
        any::<bool>().prop_map(|b| Some(FeatureOverride::Flag(b))),
        (option::of(files_strategy()), option::of(request_strategy())).prop_map(
            |(files, request)| {
                Some(FeatureOverride::Custom(FilesServiceConfig {
                    files,
                    request,
                    ..FilesServiceConfig::default()
                }))
            }
        ),
    ]
}

fn assistant_strategy() -> impl Strategy<Value = AssistantConfig> {
    (
        feature_strategy(),
        feature_strategy(),
        feature_strategy(),
        feature_strategy(),
        feature_strategy(),
    )
        .prop_map(
            |(images, audio, camera, microphone_audio, mixed_files)| AssistantConfig {
                images,
                audio,
                camera,
                microphone_audio,
                mixed_files,
            },
        )
}

fn base_request() -> RequestSettings {
    RequestSettings {
        url: "/upload".to_string(),
        ..RequestSettings::default()
    }
}

/// Building twice from identical inputs yields identical output and leaves inputs untouched
#[test]
fn test_build_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(assistant_strategy(), any::<bool>()),
            |(assistant, user_media)| {
                let snapshot = assistant.clone();
                let resolver =
                    FileTypesResolver::new().with_capability(StaticCapability(user_media));

                let first = resolver.build(&base_request(), &assistant, None).unwrap();
                let second = resolver.build(&base_request(), &assistant, None).unwrap();

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(&assistant, &snapshot);
                Ok(())
            },
        )
        .unwrap();
}

/// Every resolved request is complete: url and method are never empty
#[test]
fn test_resolved_requests_are_complete() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(assistant_strategy(), any::<bool>()),
            |(assistant, user_media)| {
                let resolved = FileTypesResolver::new()
                    .with_capability(StaticCapability(user_media))
                    .build(&base_request(), &assistant, None)
                    .unwrap();

                for slot in resolved.populated_slots() {
                    if let Some(request) = resolved.slot(slot).and_then(|c| c.request.as_ref()) {
                        prop_assert!(!request.url.is_empty());
                        prop_assert!(!request.method.is_empty());
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

/// With capture available, camera never changes the images slot
#[test]
fn test_camera_with_capability_leaves_images_alone() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&assistant_strategy(), |assistant| {
            let resolver = FileTypesResolver::new().with_capability(StaticCapability(true));
            let without_camera = AssistantConfig {
                camera: None,
                ..assistant.clone()
            };

            let with = resolver.build(&base_request(), &assistant, None).unwrap();
            let without = resolver
                .build(&base_request(), &without_camera, None)
                .unwrap();

            prop_assert_eq!(with.file_types.images, without.file_types.images);
            Ok(())
        })
        .unwrap();
}
