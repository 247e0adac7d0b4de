//! A hardened bucket that notifies a function on object creation.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use stackguard_s3_props::{BucketProps, Defaulter, MergeStrategy};
    use stackguard_synth::bucket::{BUCKET_POLICY_TYPE, BUCKET_TYPE};
    use stackguard_synth::function::{FUNCTION_TYPE, OBJECT_CREATED, PERMISSION_TYPE, ROLE_TYPE};
    use stackguard_synth::{BucketToFunction, FunctionProps, Runtime, StackKind, Template};

    use crate::test_stack;

    fn project_stack(partial: &BucketProps) -> (Template, BucketToFunction) {
        let mut stack = test_stack();
        let props = Defaulter::default().apply(partial);
        let function = FunctionProps::builder()
            .code_path("src/lambda")
            .runtime(Runtime::Nodejs14x)
            .handler("index.handler")
            .build();
        let wiring = BucketToFunction::new(&mut stack, "ExampleS3Lambda", &function, &props)
            .unwrap_or_else(|e| panic!("failed to wire bucket to function: {e}"));
        (stack.synth(), wiring)
    }

    #[test]
    fn test_should_create_an_s3_bucket() {
        let (template, _) = project_stack(&BucketProps::default());
        template
            .has_resource_properties(BUCKET_TYPE, &json!({}))
            .unwrap();
        template.resource_count_is(BUCKET_TYPE, 1).unwrap();
    }

    #[test]
    fn test_should_harden_the_wired_bucket() {
        let (template, wiring) = project_stack(&BucketProps::default());
        template
            .has_resource_properties(
                BUCKET_TYPE,
                &json!({
                    "BucketEncryption": {
                        "ServerSideEncryptionConfiguration": [
                            { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "aws:kms" } }
                        ]
                    },
                    "PublicAccessBlockConfiguration": { "BlockPublicAcls": true }
                }),
            )
            .unwrap();
        template.resource_count_is(BUCKET_POLICY_TYPE, 1).unwrap();
        assert!(wiring.bucket().policy_logical_id().is_some());
    }

    #[test]
    fn test_should_create_function_with_role() {
        let (template, wiring) = project_stack(&BucketProps::default());
        template.resource_count_is(FUNCTION_TYPE, 1).unwrap();
        template.resource_count_is(ROLE_TYPE, 1).unwrap();
        template
            .has_resource_properties(
                FUNCTION_TYPE,
                &json!({
                    "Handler": "index.handler",
                    "Runtime": "nodejs14.x",
                    "Role": { "Fn::GetAtt": [wiring.role_logical_id(), "Arn"] }
                }),
            )
            .unwrap();

        let function = template.resource(wiring.function_logical_id()).unwrap();
        assert_eq!(function.depends_on, vec![wiring.role_logical_id().to_owned()]);
    }

    #[test]
    fn test_should_notify_function_on_object_created() {
        let (template, wiring) = project_stack(&BucketProps::default());
        let function_arn = json!({ "Fn::GetAtt": [wiring.function_logical_id(), "Arn"] });

        template
            .has_resource_properties(
                BUCKET_TYPE,
                &json!({
                    "NotificationConfiguration": {
                        "LambdaConfigurations": [
                            { "Event": OBJECT_CREATED, "Function": function_arn }
                        ]
                    }
                }),
            )
            .unwrap();

        let bucket = template.resource(wiring.bucket().logical_id()).unwrap();
        assert!(
            bucket
                .depends_on
                .contains(&wiring.permission_logical_id().to_owned())
        );
    }

    #[test]
    fn test_should_let_s3_invoke_function() {
        let (template, wiring) = project_stack(&BucketProps::default());
        template
            .has_resource_properties(
                PERMISSION_TYPE,
                &json!({
                    "Action": "lambda:InvokeFunction",
                    "Principal": "s3.amazonaws.com",
                    "SourceArn": { "Fn::GetAtt": [wiring.bucket().logical_id(), "Arn"] }
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_should_match_prebuilt_layout() {
        let (expected, _) = project_stack(&BucketProps::default());
        let props = Defaulter::default().apply(&BucketProps::default());
        let stack = StackKind::BucketFunction
            .build("MyTestStack", stackguard_core::StackEnv::default(), &props)
            .unwrap();
        assert_eq!(stack.synth(), expected);
    }

    #[test]
    fn test_should_keep_caller_name_with_override() {
        let mut stack = test_stack();
        let partial = BucketProps::builder()
            .bucket_name("my-project-uploads")
            .enforce_ssl(false)
            .build();
        let props = Defaulter::new(MergeStrategy::CallerWins).apply(&partial);
        let function = FunctionProps::builder()
            .code_path("src/lambda")
            .runtime(Runtime::Nodejs20x)
            .handler("index.handler")
            .build();
        BucketToFunction::new(&mut stack, "Uploads", &function, &props).unwrap();

        let template = stack.synth();
        template
            .has_resource_properties(BUCKET_TYPE, &json!({ "BucketName": "my-project-uploads" }))
            .unwrap();
        template.resource_count_is(BUCKET_POLICY_TYPE, 0).unwrap();
    }
}
