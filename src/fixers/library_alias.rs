use crate::model::FileModel;
use crate::model::operations::tag_library_alias;

use super::PostProcessFixer;

/// Moves a trailing `WITH NAME alias` (or `AS alias`) of every library
/// import out of its arguments
pub struct LibraryAliasFixer;

impl PostProcessFixer for LibraryAliasFixer {
    fn name(&self) -> &'static str {
        "library-alias"
    }

    fn fix(&self, model: &mut FileModel) -> bool {
        let mut changed = false;
        for setting in model.setting_table_mut().iter_mut() {
            changed |= tag_library_alias(setting);
        }
        changed
    }
}
