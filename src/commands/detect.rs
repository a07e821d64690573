use crate::platform::{ClientIdentity, PlatformTag};

/// Print the platform tag for a client identity
#[tracing::instrument]
pub fn detect(identity: &ClientIdentity) -> PlatformTag {
    let tag = identity.platform_tag();
    println!("{}", tag);
    tag
}
