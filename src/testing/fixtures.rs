//! Sample profile documents.

/// A privileged profile relying on defaults for everything it omits.
pub const WEB_PROFILE: &str = "\
label: web
prefix: w
requires_pool: false
";

/// A fully specified profile.
pub const HADOOP_PROFILE: &str = "\
label: Hadoop worker
prefix: hadoop
primary_role: HADOOP
secondary_role: DATANODE
pool: HADOOP_PROD
contact: data-infra
contact_notes: page during business hours only
allowed_classes: [SERVER_NODE]
allow_suffix: true
requires_primary_role: true
requires_secondary_role: true
requires_pool: true
";

/// A profile whose root carries the built-in profile tag.
pub const TAGGED_PROFILE: &str = "\
!asset.Profile
label: tagged
prefix: t
";

/// A profile with a key no profile type declares.
pub const PROFILE_WITH_UNKNOWN_KEY: &str = "\
label: legacy
prefix: l
rack_position: 12
";

/// A profile document that is not a mapping.
pub const MALFORMED_PROFILE: &str = "- label: web\n- prefix: w\n";

/// A catalog of two profiles.
pub const CATALOG: &str = "\
profiles:
  hadoop:
    label: Hadoop worker
    prefix: hadoop
    primary_role: HADOOP
  web:
    label: web
    prefix: w
    requires_pool: false
";
