//! Named-import lookup for a source module

use crate::models::SourceModule;
use indexmap::IndexMap;

/// Map every named import binding of `module` to its module specifier
///
/// Keys are local binding names. Default and namespace bindings are not
/// named imports and are left out.
pub fn named_import_index(module: &SourceModule) -> IndexMap<String, String> {
    let mut index = IndexMap::new();
    for import in &module.imports {
        for named in &import.named {
            index.insert(named.local.clone(), import.module_specifier.clone());
        }
    }
    index
}
