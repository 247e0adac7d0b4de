//! A bucket wired as an event source for a function.

use std::collections::BTreeMap;
use std::fmt;

use md5::{Digest, Md5};
use serde_json::{Value, json};
use stackguard_s3_props::{BucketProps, validate_bucket_props};
use typed_builder::TypedBuilder;

use crate::bucket::{Bucket, get_att_arn};
use crate::error::SynthResult;
use crate::stack::{ConstructPath, Stack};
use crate::template::CfnResource;

/// Resource type of the function.
pub const FUNCTION_TYPE: &str = "AWS::Lambda::Function";

/// Resource type of the invoke permission.
pub const PERMISSION_TYPE: &str = "AWS::Lambda::Permission";

/// Resource type of the execution role.
pub const ROLE_TYPE: &str = "AWS::IAM::Role";

/// Event the function is subscribed to unless told otherwise.
pub const OBJECT_CREATED: &str = "s3:ObjectCreated:*";

/// Function runtime identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    /// `nodejs14.x`
    Nodejs14x,
    /// `nodejs18.x`
    Nodejs18x,
    /// `nodejs20.x`
    Nodejs20x,
    /// `python3.12`
    Python312,
    /// `provided.al2023`
    ProvidedAl2023,
}

impl Runtime {
    /// Returns the runtime identifier used in templates.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nodejs14x => "nodejs14.x",
            Self::Nodejs18x => "nodejs18.x",
            Self::Nodejs20x => "nodejs20.x",
            Self::Python312 => "python3.12",
            Self::ProvidedAl2023 => "provided.al2023",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties of the function a bucket notifies.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct FunctionProps {
    /// Local path of the code asset.
    #[builder(setter(into))]
    pub code_path: String,

    /// Runtime the function executes on.
    pub runtime: Runtime,

    /// Entry point, e.g. `index.handler`.
    #[builder(setter(into))]
    pub handler: String,

    /// Memory in MB.
    #[builder(default, setter(strip_option))]
    pub memory_size: Option<u32>,

    /// Timeout in seconds.
    #[builder(default, setter(strip_option))]
    pub timeout_secs: Option<u32>,

    /// Environment variables.
    #[builder(default)]
    pub environment: BTreeMap<String, String>,

    /// Bucket events that trigger the function.
    #[builder(default = vec![OBJECT_CREATED.to_owned()])]
    pub events: Vec<String>,
}

/// A bucket plus a function that is invoked on bucket events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketToFunction {
    bucket: Bucket,
    function_logical_id: String,
    role_logical_id: String,
    permission_logical_id: String,
}

impl BucketToFunction {
    /// Add the bucket, its function, and the wiring between them.
    ///
    /// `bucket_props` is taken as-is; run it through the defaulter first.
    /// The record is validated before anything is added to the stack.
    pub fn new(
        stack: &mut Stack,
        id: &str,
        function: &FunctionProps,
        bucket_props: &BucketProps,
    ) -> SynthResult<Self> {
        validate_bucket_props(bucket_props)?;

        let path = ConstructPath::root().child(id)?;
        stack.register_construct(&path)?;

        let bucket = Bucket::scoped(stack, &path, "S3Bucket", bucket_props)?;

        let role_path = path.child("LambdaFunctionServiceRole")?;
        stack.register_construct(&role_path)?;
        let role_logical_id = stack.add_resource(
            &role_path.child("Resource")?,
            execution_role(stack.env().region.partition()),
        )?;

        let function_path = path.child("LambdaFunction")?;
        stack.register_construct(&function_path)?;
        let mut function_resource = function_resource(stack, function, &role_logical_id);
        function_resource.add_dependency(&role_logical_id);
        let function_logical_id =
            stack.add_resource(&function_path.child("Resource")?, function_resource)?;

        let permission = CfnResource::new(PERMISSION_TYPE)
            .with_property("Action", json!("lambda:InvokeFunction"))
            .with_property("FunctionName", get_att_arn(&function_logical_id))
            .with_property("Principal", json!("s3.amazonaws.com"))
            .with_property("SourceAccount", json!(stack.env().account.as_str()))
            .with_property("SourceArn", bucket.arn());
        let permission_logical_id = stack.add_resource(
            &function_path.child("AllowBucketNotifications")?,
            permission,
        )?;

        let notifications: Vec<Value> = function
            .events
            .iter()
            .map(|event| json!({ "Event": event, "Function": get_att_arn(&function_logical_id) }))
            .collect();
        bucket.set_notifications(
            stack,
            json!({ "LambdaConfigurations": notifications }),
            &permission_logical_id,
        );

        tracing::debug!(
            path = %path,
            bucket = %bucket.logical_id(),
            function = %function_logical_id,
            runtime = %function.runtime,
            "wired bucket to function"
        );

        Ok(Self {
            bucket,
            function_logical_id,
            role_logical_id,
            permission_logical_id,
        })
    }

    /// The bucket.
    #[must_use]
    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Logical id of the function.
    #[must_use]
    pub fn function_logical_id(&self) -> &str {
        &self.function_logical_id
    }

    /// Logical id of the execution role.
    #[must_use]
    pub fn role_logical_id(&self) -> &str {
        &self.role_logical_id
    }

    /// Logical id of the invoke permission.
    #[must_use]
    pub fn permission_logical_id(&self) -> &str {
        &self.permission_logical_id
    }
}

fn execution_role(partition: &str) -> CfnResource {
    CfnResource::new(ROLE_TYPE)
        .with_property(
            "AssumeRolePolicyDocument",
            json!({
                "Statement": [
                    {
                        "Action": "sts:AssumeRole",
                        "Effect": "Allow",
                        "Principal": { "Service": "lambda.amazonaws.com" }
                    }
                ],
                "Version": "2012-10-17"
            }),
        )
        .with_property(
            "ManagedPolicyArns",
            json!([format!(
                "arn:{partition}:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"
            )]),
        )
}

fn function_resource(stack: &Stack, props: &FunctionProps, role_logical_id: &str) -> CfnResource {
    let env = stack.env();
    // Asset key is derived from the asset path; uploading it is the deployer's job.
    let asset_hash = hex::encode(Md5::digest(props.code_path.as_bytes()));

    let mut resource = CfnResource::new(FUNCTION_TYPE)
        .with_property(
            "Code",
            json!({
                "S3Bucket": format!("stackguard-assets-{}-{}", env.account, env.region),
                "S3Key": format!("{asset_hash}.zip"),
            }),
        )
        .with_property("Handler", json!(props.handler))
        .with_property("Role", get_att_arn(role_logical_id))
        .with_property("Runtime", json!(props.runtime.as_str()));

    if let Some(memory) = props.memory_size {
        resource = resource.with_property("MemorySize", json!(memory));
    }
    if let Some(timeout) = props.timeout_secs {
        resource = resource.with_property("Timeout", json!(timeout));
    }
    if !props.environment.is_empty() {
        resource = resource.with_property(
            "Environment",
            json!({ "Variables": props.environment }),
        );
    }
    resource
}
