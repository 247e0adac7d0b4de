//! How each merge strategy shows up in the synthesized template.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use stackguard_s3_props::{BucketProps, MergeStrategy};
    use stackguard_synth::bucket::{BUCKET_POLICY_TYPE, BUCKET_TYPE};

    use crate::synth_bucket;

    #[test]
    fn test_should_render_full_baseline_for_empty_props() {
        let (template, _) = synth_bucket(&BucketProps::default(), MergeStrategy::DefaultsWin);
        template
            .has_resource_properties(
                BUCKET_TYPE,
                &json!({ "LoggingConfiguration": { "LogFilePrefix": "_accesslogs" } }),
            )
            .unwrap();
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
    }

    #[test]
    fn test_should_keep_tls_policy_when_defaults_win() {
        let partial = BucketProps::builder().enforce_ssl(false).build();
        let (template, _) = synth_bucket(&partial, MergeStrategy::DefaultsWin);
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
    }

    #[test]
    fn test_should_drop_tls_policy_when_caller_wins() {
        let partial = BucketProps::builder().enforce_ssl(false).build();
        let (template, _) = synth_bucket(&partial, MergeStrategy::CallerWins);
        template.resource_count_is(BUCKET_POLICY_TYPE, 0).unwrap();
        template
            .has_resource_properties(
                BUCKET_TYPE,
                &json!({ "PublicAccessBlockConfiguration": { "RestrictPublicBuckets": true } }),
            )
            .unwrap();
    }

    #[test]
    fn test_should_pass_bucket_name_through_either_way() {
        let partial = BucketProps::builder().bucket_name("my-bucket").build();
        for strategy in [MergeStrategy::DefaultsWin, MergeStrategy::CallerWins] {
            let (template, _) = synth_bucket(&partial, strategy);
            template
                .has_resource_properties(
                    BUCKET_TYPE,
                    &json!({
                        "BucketName": "my-bucket",
                        "BucketEncryption": {
                            "ServerSideEncryptionConfiguration": [
                                { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "aws:kms" } }
                            ]
                        }
                    }),
                )
                .unwrap();
        }
    }

    #[test]
    fn test_should_render_explicit_tls_props_unchanged() {
        let partial = BucketProps::builder().enforce_ssl(true).build();
        let (template, bucket_id) =
            synth_bucket(&partial, MergeStrategy::ExplicitTlsPassthrough);

        // Only the policy: none of the baseline's bucket settings are applied.
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
        let bucket = template.resource(&bucket_id).unwrap();
        assert!(bucket.properties.is_empty());
    }

    #[test]
    fn test_should_render_baseline_when_tls_not_explicit() {
        let partial = BucketProps::builder().enforce_ssl(false).build();
        let (template, _) = synth_bucket(&partial, MergeStrategy::ExplicitTlsPassthrough);
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
        template
            .has_resource_properties(BUCKET_TYPE, &json!({ "LoggingConfiguration": {} }))
            .unwrap();
    }

    #[test]
    fn test_should_report_mismatch_for_weakened_bucket() {
        let partial = BucketProps::builder()
            .encryption(stackguard_s3_props::BucketEncryption::S3Managed)
            .build();
        let (template, _) = synth_bucket(&partial, MergeStrategy::CallerWins);
        let err = template
            .has_resource_properties(
                BUCKET_TYPE,
                &json!({
                    "BucketEncryption": {
                        "ServerSideEncryptionConfiguration": [
                            { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "aws:kms" } }
                        ]
                    }
                }),
            )
            .unwrap_err();
        assert!(err.to_string().contains("AWS::S3::Bucket"));
    }
}
