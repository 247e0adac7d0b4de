//! The bucket construct.
//!
//! Translates a finished [`BucketProps`] into an `AWS::S3::Bucket`, plus an
//! `AWS::S3::BucketPolicy` when TLS is enforced and an `AWS::KMS::Key` when
//! customer-managed encryption is requested without a key.

use serde_json::{Map, Value, json};
use stackguard_s3_props::{BlockPublicAccess, BucketEncryption, BucketProps, validate_bucket_props};

use crate::error::SynthResult;
use crate::stack::{ConstructPath, Stack};
use crate::template::CfnResource;

/// Resource type of the bucket itself.
pub const BUCKET_TYPE: &str = "AWS::S3::Bucket";

/// Resource type of the TLS-enforcing policy.
pub const BUCKET_POLICY_TYPE: &str = "AWS::S3::BucketPolicy";

/// Resource type of the generated encryption key.
pub const KEY_TYPE: &str = "AWS::KMS::Key";

/// A bucket that has been added to a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    path: ConstructPath,
    logical_id: String,
    policy_logical_id: Option<String>,
    key_logical_id: Option<String>,
}

impl Bucket {
    /// Add a bucket directly under the stack.
    pub fn new(stack: &mut Stack, id: &str, props: &BucketProps) -> SynthResult<Self> {
        Self::scoped(stack, &ConstructPath::root(), id, props)
    }

    /// Add a bucket under an enclosing construct.
    ///
    /// `props` is taken as-is; run it through the defaulter first. The
    /// record is validated before anything is added to the stack.
    pub fn scoped(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: &BucketProps,
    ) -> SynthResult<Self> {
        validate_bucket_props(props)?;

        let path = scope.child(id)?;
        stack.register_construct(&path)?;

        let encryption = effective_encryption(props);
        let key_logical_id = match (encryption, &props.encryption_key) {
            (Some(BucketEncryption::Kms), None) => {
                let key = encryption_key_resource(stack);
                Some(stack.add_resource(&path.child("Key")?.child("Resource")?, key)?)
            }
            _ => None,
        };

        let mut bucket = CfnResource::new(BUCKET_TYPE).retained();

        // Unrecognized props go through as-is; known props below take precedence.
        for (key, value) in &props.extra {
            bucket.properties.insert(pascal_case(key), value.clone());
        }
        if let Some(name) = &props.bucket_name {
            bucket.properties.insert("BucketName".into(), json!(name));
        }
        if let Some(encryption) = encryption {
            let key_arn = props
                .encryption_key
                .as_ref()
                .map(|arn| json!(arn))
                .or_else(|| key_logical_id.as_deref().map(get_att_arn));
            if let Some(rule) = encryption_rule(encryption, key_arn) {
                bucket.properties.insert("BucketEncryption".into(), rule);
            }
        }
        if let Some(block) = &props.block_public_access {
            bucket.properties.insert(
                "PublicAccessBlockConfiguration".into(),
                public_access_block(block),
            );
        }
        if let Some(prefix) = &props.server_access_logs_prefix {
            // No destination bucket: the bucket logs to itself.
            bucket
                .properties
                .insert("LoggingConfiguration".into(), json!({ "LogFilePrefix": prefix }));
        }
        if props.versioned == Some(true) {
            bucket
                .properties
                .insert("VersioningConfiguration".into(), json!({ "Status": "Enabled" }));
        }

        let logical_id = stack.add_resource(&path.child("Resource")?, bucket)?;

        let policy_logical_id = if props.enforce_ssl == Some(true) {
            let policy = tls_only_policy(&logical_id);
            Some(stack.add_resource(&path.child("Policy")?.child("Resource")?, policy)?)
        } else {
            None
        };

        tracing::debug!(
            path = %path,
            logical_id = %logical_id,
            encryption = ?encryption,
            enforce_ssl = policy_logical_id.is_some(),
            "added bucket"
        );

        Ok(Self {
            path,
            logical_id,
            policy_logical_id,
            key_logical_id,
        })
    }

    /// Construct path of the bucket.
    #[must_use]
    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// Logical id of the `AWS::S3::Bucket` resource.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Logical id of the TLS-enforcing policy, if one was added.
    #[must_use]
    pub fn policy_logical_id(&self) -> Option<&str> {
        self.policy_logical_id.as_deref()
    }

    /// Logical id of the generated encryption key, if one was added.
    #[must_use]
    pub fn key_logical_id(&self) -> Option<&str> {
        self.key_logical_id.as_deref()
    }

    /// `Fn::GetAtt` reference to the bucket ARN.
    #[must_use]
    pub fn arn(&self) -> Value {
        get_att_arn(&self.logical_id)
    }

    /// Attach a notification configuration to the bucket resource.
    pub(crate) fn set_notifications(&self, stack: &mut Stack, config: Value, depends_on: &str) {
        if let Some(resource) = stack.resource_mut(&self.logical_id) {
            resource
                .properties
                .insert("NotificationConfiguration".into(), config);
            resource.add_dependency(depends_on);
        }
    }
}

/// Encryption mode the bucket ends up with: a key without a mode implies KMS.
fn effective_encryption(props: &BucketProps) -> Option<BucketEncryption> {
    match (props.encryption, &props.encryption_key) {
        (None, Some(_)) => Some(BucketEncryption::Kms),
        (encryption, _) => encryption,
    }
}

pub(crate) fn get_att_arn(logical_id: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, "Arn"] })
}

fn encryption_rule(encryption: BucketEncryption, key_arn: Option<Value>) -> Option<Value> {
    let algorithm = encryption.sse_algorithm()?;

    let mut by_default = Map::new();
    if encryption == BucketEncryption::Kms {
        if let Some(arn) = key_arn {
            by_default.insert("KMSMasterKeyID".into(), arn);
        }
    }
    by_default.insert("SSEAlgorithm".into(), json!(algorithm));

    Some(json!({
        "ServerSideEncryptionConfiguration": [
            { "ServerSideEncryptionByDefault": by_default }
        ]
    }))
}

fn public_access_block(block: &BlockPublicAccess) -> Value {
    json!({
        "BlockPublicAcls": block.block_public_acls,
        "BlockPublicPolicy": block.block_public_policy,
        "IgnorePublicAcls": block.ignore_public_acls,
        "RestrictPublicBuckets": block.restrict_public_buckets,
    })
}

fn tls_only_policy(bucket_logical_id: &str) -> CfnResource {
    let arn = get_att_arn(bucket_logical_id);
    CfnResource::new(BUCKET_POLICY_TYPE)
        .with_property("Bucket", json!({ "Ref": bucket_logical_id }))
        .with_property(
            "PolicyDocument",
            json!({
                "Statement": [
                    {
                        "Action": "s3:*",
                        "Condition": { "Bool": { "aws:SecureTransport": "false" } },
                        "Effect": "Deny",
                        "Principal": { "AWS": "*" },
                        "Resource": [
                            arn.clone(),
                            { "Fn::Join": ["", [arn, "/*"]] }
                        ]
                    }
                ],
                "Version": "2012-10-17"
            }),
        )
}

fn encryption_key_resource(stack: &Stack) -> CfnResource {
    let env = stack.env();
    let root = format!(
        "arn:{}:iam::{}:root",
        env.region.partition(),
        env.account
    );
    CfnResource::new(KEY_TYPE)
        .retained()
        .with_property("Description", json!(format!("Created by {}", stack.name())))
        .with_property("EnableKeyRotation", json!(true))
        .with_property(
            "KeyPolicy",
            json!({
                "Statement": [
                    {
                        "Action": "kms:*",
                        "Effect": "Allow",
                        "Principal": { "AWS": root },
                        "Resource": "*"
                    }
                ],
                "Version": "2012-10-17"
            }),
        )
}

/// `objectOwnership` -> `ObjectOwnership`.
fn pascal_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use stackguard_core::{AccountId, AwsRegion, StackEnv};
    use stackguard_s3_props::{DefaultPolicy, compute_effective_config};

    use super::*;
    use crate::error::SynthError;

    fn stack() -> Stack {
        Stack::new("TestStack", StackEnv::default())
    }

    #[test]
    fn test_should_render_hardened_bucket() {
        let mut stack = stack();
        let bucket = Bucket::new(&mut stack, "S3Bucket", &DefaultPolicy::HARDENED.to_props()).unwrap();
        let template = stack.synth();

        let resource = template.resource(bucket.logical_id()).unwrap();
        assert_eq!(resource.resource_type, BUCKET_TYPE);
        assert_eq!(resource.deletion_policy.as_deref(), Some("Retain"));
        assert_eq!(
            resource.properties["BucketEncryption"],
            json!({
                "ServerSideEncryptionConfiguration": [
                    { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "aws:kms" } }
                ]
            })
        );
        assert_eq!(
            resource.properties["LoggingConfiguration"],
            json!({ "LogFilePrefix": "_accesslogs" })
        );
        assert!(bucket.policy_logical_id().is_some());
        assert!(bucket.key_logical_id().is_none());
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
    }

    #[test]
    fn test_should_skip_policy_when_tls_not_enforced() {
        let mut stack = stack();
        let props = compute_effective_config(&BucketProps::builder().enforce_ssl(false).build(), true);
        let bucket = Bucket::new(&mut stack, "S3Bucket", &props).unwrap();
        assert!(bucket.policy_logical_id().is_none());
        stack.synth().resource_count_is(BUCKET_POLICY_TYPE, 0).unwrap();
    }

    #[test]
    fn test_should_render_empty_props_as_bare_bucket() {
        let mut stack = stack();
        let bucket = Bucket::new(&mut stack, "Plain", &BucketProps::default()).unwrap();
        let template = stack.synth();
        assert!(template.resource(bucket.logical_id()).unwrap().properties.is_empty());
        assert_eq!(template.resources.len(), 1);
    }

    #[test]
    fn test_should_create_key_for_customer_managed_encryption() {
        let env = StackEnv::new(AccountId::new("123456789012").unwrap(), AwsRegion::new("cn-north-1"));
        let mut stack = Stack::new("KeyStack", env);
        let props = BucketProps::builder().encryption(BucketEncryption::Kms).build();
        let bucket = Bucket::new(&mut stack, "Data", &props).unwrap();
        let key_id = bucket.key_logical_id().unwrap().to_owned();
        let template = stack.synth();

        let key = template.resource(&key_id).unwrap();
        assert_eq!(key.resource_type, KEY_TYPE);
        assert_eq!(
            key.properties["KeyPolicy"]["Statement"][0]["Principal"]["AWS"],
            "arn:aws-cn:iam::123456789012:root"
        );
        let properties = &template.resource(bucket.logical_id()).unwrap().properties;
        let by_default = &properties["BucketEncryption"]["ServerSideEncryptionConfiguration"][0]
            ["ServerSideEncryptionByDefault"];
        assert_eq!(by_default["KMSMasterKeyID"], json!({ "Fn::GetAtt": [key_id, "Arn"] }));
    }

    #[test]
    fn test_should_use_supplied_key_arn() {
        let arn = "arn:aws:kms:us-east-1:123456789012:key/abc";
        let mut stack = stack();
        let props = BucketProps::builder().encryption_key(arn).build();
        let bucket = Bucket::new(&mut stack, "Data", &props).unwrap();
        assert!(bucket.key_logical_id().is_none());

        let template = stack.synth();
        let properties = &template.resource(bucket.logical_id()).unwrap().properties;
        let by_default = &properties["BucketEncryption"]["ServerSideEncryptionConfiguration"][0]
            ["ServerSideEncryptionByDefault"];
        assert_eq!(by_default["KMSMasterKeyID"], arn);
        assert_eq!(by_default["SSEAlgorithm"], "aws:kms");
    }

    #[test]
    fn test_should_omit_encryption_block_when_unencrypted() {
        let mut stack = stack();
        let props = BucketProps::builder()
            .encryption(BucketEncryption::Unencrypted)
            .build();
        let bucket = Bucket::new(&mut stack, "Open", &props).unwrap();
        let template = stack.synth();
        assert!(
            !template
                .resource(bucket.logical_id())
                .unwrap()
                .properties
                .contains_key("BucketEncryption")
        );
    }

    #[test]
    fn test_should_pass_name_versioning_and_unknown_props_through() {
        let mut stack = stack();
        let mut props = BucketProps::builder()
            .bucket_name("example-bucket")
            .versioned(true)
            .build();
        props
            .extra
            .insert("objectLockEnabled".into(), json!(true));
        let bucket = Bucket::new(&mut stack, "Named", &props).unwrap();
        let template = stack.synth();
        let properties = &template.resource(bucket.logical_id()).unwrap().properties;
        assert_eq!(properties["BucketName"], "example-bucket");
        assert_eq!(properties["VersioningConfiguration"], json!({ "Status": "Enabled" }));
        assert_eq!(properties["ObjectLockEnabled"], true);
    }

    #[test]
    fn test_should_reject_invalid_props_before_adding_resources() {
        let mut stack = stack();
        let props = BucketProps::builder().bucket_name("Invalid_Name").build();
        let err = Bucket::new(&mut stack, "Bad", &props).unwrap_err();
        assert!(matches!(err, SynthError::InvalidProps(_)));
        assert!(stack.synth().resources.is_empty());
    }

    #[test]
    fn test_should_reject_duplicate_bucket_id() {
        let mut stack = stack();
        Bucket::new(&mut stack, "S3Bucket", &BucketProps::default()).unwrap();
        let err = Bucket::new(&mut stack, "S3Bucket", &BucketProps::default()).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateConstruct { .. }));
    }

    #[test]
    fn test_should_pascal_case_keys() {
        assert_eq!(pascal_case("objectOwnership"), "ObjectOwnership");
        assert_eq!(pascal_case(""), "");
    }
}
