//! Security checks on a bucket built from the hardened defaults alone.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use stackguard_s3_props::{BucketProps, MergeStrategy};

    use crate::synth_bucket;

    fn default_bucket() -> (stackguard_synth::Template, String) {
        synth_bucket(&BucketProps::default(), MergeStrategy::DefaultsWin)
    }

    #[test]
    fn test_should_create_a_bucket() {
        let (template, _) = default_bucket();
        template
            .has_resource_properties("AWS::S3::Bucket", &json!({}))
            .unwrap();
    }

    #[test]
    fn test_should_encrypt_with_kms_by_default() {
        let (template, _) = default_bucket();
        template
            .has_resource_properties(
                "AWS::S3::Bucket",
                &json!({
                    "BucketEncryption": {
                        "ServerSideEncryptionConfiguration": [
                            { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "aws:kms" } }
                        ]
                    }
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_should_enable_server_access_logs() {
        let (template, _) = default_bucket();
        template
            .has_resource_properties("AWS::S3::Bucket", &json!({ "LoggingConfiguration": {} }))
            .unwrap();
    }

    #[test]
    fn test_should_block_public_access() {
        let (template, _) = default_bucket();
        template
            .has_resource_properties(
                "AWS::S3::Bucket",
                &json!({
                    "PublicAccessBlockConfiguration": {
                        "BlockPublicAcls": true,
                        "BlockPublicPolicy": true,
                        "IgnorePublicAcls": true,
                        "RestrictPublicBuckets": true
                    }
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_should_require_requests_to_use_ssl() {
        let (template, bucket_id) = default_bucket();
        template
            .has_resource_properties(
                "AWS::S3::BucketPolicy",
                &json!({
                    "PolicyDocument": {
                        "Statement": [
                            {
                                "Action": "s3:*",
                                "Condition": { "Bool": { "aws:SecureTransport": "false" } },
                                "Effect": "Deny",
                                "Principal": { "AWS": "*" },
                                "Resource": [
                                    { "Fn::GetAtt": [bucket_id, "Arn"] },
                                    {
                                        "Fn::Join": [
                                            "",
                                            [{ "Fn::GetAtt": [bucket_id, "Arn"] }, "/*"]
                                        ]
                                    }
                                ]
                            }
                        ],
                        "Version": "2012-10-17"
                    }
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_should_retain_bucket_on_delete() {
        let (template, bucket_id) = default_bucket();
        let bucket = template.resource(&bucket_id).expect("bucket resource");
        assert_eq!(bucket.deletion_policy.as_deref(), Some("Retain"));
        assert_eq!(bucket.update_replace_policy.as_deref(), Some("Retain"));
    }
}
