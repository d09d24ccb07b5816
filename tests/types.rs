// ABOUTME: Integration tests for validated identifiers and manifest parsing.
// ABOUTME: Unit cases plus property tests over the pure parsers.

use nimbus::types::*;
use proptest::prelude::*;

mod image_id_tests {
    use super::*;

    #[test]
    fn valid_id_parses() {
        let id = ImageId::parse("ami-123456789012").unwrap();
        assert_eq!(id.as_str(), "ami-123456789012");
        assert_eq!(id.to_string(), "ami-123456789012");
    }

    #[test]
    fn hex_suffix_parses() {
        assert!(ImageId::parse("ami-0abc9def8765ff").is_err()); // 18 chars
        assert!(ImageId::parse("ami-0abc9def8765").is_ok());
    }

    #[test]
    fn empty_returns_error() {
        assert!(matches!(ImageId::parse(""), Err(ParseImageIdError::Empty)));
    }

    #[test]
    fn missing_prefix_returns_error() {
        assert!(matches!(
            ImageId::parse("img-123456789012"),
            Err(ParseImageIdError::MissingPrefix(_))
        ));
    }

    #[test]
    fn wrong_length_returns_error() {
        assert!(matches!(
            ImageId::parse("ami-123"),
            Err(ParseImageIdError::WrongLength(7))
        ));
        assert!(matches!(
            ImageId::parse("ami-1234567890123"),
            Err(ParseImageIdError::WrongLength(17))
        ));
    }

    #[test]
    fn non_hex_suffix_returns_error() {
        assert!(matches!(
            ImageId::parse("ami-12345678901x"),
            Err(ParseImageIdError::InvalidChar('x'))
        ));
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        assert!(matches!(
            ImageId::parse("ami-12345678901A"),
            Err(ParseImageIdError::InvalidChar('A'))
        ));
    }
}

mod manifest_tests {
    use super::*;

    #[test]
    fn parse_simple_location() {
        let loc = ManifestLocation::parse("mybucket/img.manifest.xml").unwrap();
        assert_eq!(loc.bucket(), "mybucket");
        assert_eq!(loc.manifest_key(), "img.manifest.xml");
        assert_eq!(loc.file_prefix(), "img");
    }

    #[test]
    fn nested_key_uses_basename_for_prefix() {
        let loc = ManifestLocation::parse("mybucket/images/node.manifest.xml").unwrap();
        assert_eq!(loc.bucket(), "mybucket");
        assert_eq!(loc.manifest_key(), "images/node.manifest.xml");
        assert_eq!(loc.file_prefix(), "node");
    }

    #[test]
    fn display_reconstructs_input() {
        let input = "mybucket/images/node.manifest.xml";
        let loc = ManifestLocation::parse(input).unwrap();
        assert_eq!(loc.to_string(), input);
    }

    #[test]
    fn empty_returns_error() {
        assert!(matches!(
            ManifestLocation::parse(""),
            Err(ParseManifestError::Empty)
        ));
    }

    #[test]
    fn missing_bucket_returns_error() {
        assert!(matches!(
            ManifestLocation::parse("img.manifest.xml"),
            Err(ParseManifestError::MissingBucket(_))
        ));
        assert!(matches!(
            ManifestLocation::parse("/img.manifest.xml"),
            Err(ParseManifestError::MissingBucket(_))
        ));
    }

    #[test]
    fn missing_suffix_returns_error() {
        assert!(matches!(
            ManifestLocation::parse("mybucket/img.part.0"),
            Err(ParseManifestError::MissingSuffix(_))
        ));
    }

    #[test]
    fn empty_object_path_returns_error() {
        assert!(matches!(
            ManifestLocation::parse("mybucket/.manifest.xml"),
            Err(ParseManifestError::EmptyPath(_))
        ));
        assert!(matches!(
            ManifestLocation::parse("mybucket/dir/.manifest.xml"),
            Err(ParseManifestError::EmptyPath(_))
        ));
    }
}

mod id_tests {
    use super::*;

    #[test]
    fn ids_display_their_value() {
        let id = InstanceId::new("i-deadbeef".to_string());
        assert_eq!(id.as_str(), "i-deadbeef");
        assert_eq!(id.to_string(), "i-deadbeef");
    }

    #[test]
    fn ids_compare_by_value_within_a_kind() {
        let a = VolumeId::from("vol-1");
        let b = VolumeId::new("vol-1".to_string());
        assert_eq!(a, b);
    }
}

proptest! {
    #[test]
    fn any_twelve_hex_suffix_is_a_valid_image_id(suffix in "[0-9a-f]{12}") {
        prop_assert!(ImageId::parse(&format!("ami-{suffix}")).is_ok());
    }

    #[test]
    fn ids_without_the_prefix_never_parse(id in "[a-z0-9-]{1,24}") {
        prop_assume!(!id.starts_with("ami-"));
        prop_assert!(ImageId::parse(&id).is_err());
    }

    #[test]
    fn wellformed_locations_roundtrip(
        bucket in "[a-z0-9-]{3,20}",
        name in "[a-z0-9_.-]{1,20}",
    ) {
        let input = format!("{bucket}/{name}.manifest.xml");
        let loc = ManifestLocation::parse(&input).unwrap();
        prop_assert_eq!(loc.bucket(), bucket.as_str());
        prop_assert_eq!(loc.file_prefix(), name.as_str());
        prop_assert_eq!(loc.to_string(), input);
    }

    #[test]
    fn suffixless_locations_never_parse(
        bucket in "[a-z0-9-]{3,20}",
        key in "[a-z0-9/._-]{1,30}",
    ) {
        prop_assume!(!key.ends_with(".manifest.xml"));
        prop_assert!(ManifestLocation::parse(&format!("{bucket}/{key}")).is_err());
    }
}
