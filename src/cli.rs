// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Machine-image and storage housekeeping for EC2-compatible clouds")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new nimbus.yml configuration file
    Init {
        /// Region to write into the template
        #[arg(long)]
        region: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List machine images owned by this account
    Images,

    /// List the storage objects backing an image
    ImageFiles {
        /// Image identifier
        image_id: String,
    },

    /// Delete an image's backing files and deregister it
    RemoveImage {
        /// Image identifier
        image_id: String,

        /// Actually delete; without this flag the run is a dry run
        #[arg(long)]
        force: bool,

        /// Delete the backing files but keep the image record
        #[arg(long)]
        files_only: bool,

        /// Delete/verify passes before giving up
        #[arg(long)]
        max_passes: Option<usize>,
    },

    /// List instances
    Instances {
        /// Only instances in the running state
        #[arg(long)]
        running: bool,
    },

    /// Launch instances from an image
    Launch {
        /// Image identifier
        image_id: String,

        /// Instance type
        #[arg(long, default_value = "m1.small")]
        instance_type: String,

        /// Number of instances
        #[arg(long, default_value_t = 1)]
        count: i32,

        /// Key pair for SSH access (must exist)
        #[arg(long)]
        key_name: Option<String>,

        /// Security group(s) to attach
        #[arg(long)]
        group: Vec<String>,

        /// Availability zone (must exist)
        #[arg(long)]
        zone: Option<String>,
    },

    /// Terminate instances
    Terminate {
        /// Instance identifiers
        #[arg(required = true)]
        instance_ids: Vec<String>,
    },

    /// List security groups
    Groups,

    /// Look up a security group, creating it if absent
    EnsureGroup {
        /// Group name
        name: String,

        /// Description (applies only on creation)
        #[arg(long, default_value = "managed by nimbus")]
        description: String,

        /// Skip the default SSH ingress rule on creation
        #[arg(long)]
        no_ssh: bool,

        /// Authorize all traffic between group members on creation
        #[arg(long)]
        group_traffic: bool,
    },

    /// List volumes
    Volumes,

    /// List storage buckets
    Buckets,

    /// List the objects in a bucket
    ShowBucket {
        /// Bucket name
        bucket: String,
    },
}
