// ABOUTME: AWS-backed provider implementation.
// ABOUTME: ComputeOps over aws-sdk-ec2, StorageOps over aws-sdk-s3.

mod compute;
mod connect;
mod storage;

pub use compute::AwsCompute;
pub use connect::{ConnectionSettings, Credentials};
pub use storage::AwsStorage;
