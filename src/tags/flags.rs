//! Boolean marker tags (`@static`, `@private`, `@chainable`, ...)

use crate::merge::MergeContext;
use crate::schema::Entity;

use super::{DocEntity, TagBehavior, TagData, TagKey, TagRegistry};

/// A tag that sets one boolean field when present
pub struct FlagTag {
    name: &'static str,
    markers: &'static [&'static str],
    get: fn(&Entity) -> bool,
    set: fn(&mut Entity, bool),
}

impl TagBehavior for FlagTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: self.name,
            markers: self.markers,
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, _body: &str) -> Vec<TagData> {
        vec![TagData::new(marker)]
    }

    fn process_doc(&self, doc: &mut DocEntity, _tags: &[TagData]) {
        (self.set)(&mut doc.entity, true);
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        let value = (self.get)(cx.doc) || (cx.same_kind && (self.get)(cx.code));
        (self.set)(target, value);
    }
}

pub fn register_all(registry: TagRegistry) -> TagRegistry {
    registry
        .register(FlagTag {
            name: "chainable",
            markers: &["chainable"],
            get: |e| e.chainable,
            set: |e, v| e.chainable = v,
        })
        .register(FlagTag {
            name: "static",
            markers: &["static"],
            get: |e| e.is_static,
            set: |e, v| e.is_static = v,
        })
        .register(FlagTag {
            name: "private",
            markers: &["private"],
            get: |e| e.private,
            set: |e, v| e.private = v,
        })
        .register(FlagTag {
            name: "protected",
            markers: &["protected"],
            get: |e| e.protected,
            set: |e, v| e.protected = v,
        })
        .register(FlagTag {
            name: "inheritdoc",
            markers: &["inheritdoc", "inheritDoc"],
            get: |e| e.inheritdoc,
            set: |e, v| e.inheritdoc = v,
        })
        .register(FlagTag {
            name: "accessor",
            markers: &["accessor"],
            get: |e| e.accessor,
            set: |e, v| e.accessor = v,
        })
        .register(FlagTag {
            name: "evented",
            markers: &["evented"],
            get: |e| e.evented,
            set: |e, v| e.evented = v,
        })
        .register(FlagTag {
            name: "inheritable",
            markers: &["inheritable"],
            get: |e| e.inheritable,
            set: |e, v| e.inheritable = v,
        })
}
