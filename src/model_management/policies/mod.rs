mod reserved_ids;

pub use reserved_ids::{
    canonical_bundle_id, FragmentExclusion, DEFAULT_PROJECT_NATURE, DEFAULT_SYSTEM_BUNDLE_ID,
    LEGACY_COMPATIBILITY_FRAGMENT, SYSTEM_BUNDLE_ALIAS,
};
