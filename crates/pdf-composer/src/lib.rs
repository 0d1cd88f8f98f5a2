//! Page import for attached PDFs.
//!
//! An estimate page may reference a PDF (a product sheet, a signed contract).
//! Its pages are deep-copied into the document being assembled, with every
//! object they reference remapped to fresh IDs in the target.

mod error;

pub use error::ComposerError;

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Tracks objects already copied from one source into one target.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Deep copies an object and everything it references, once per source ID.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the target ID before recursing so reference cycles terminate.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        // A dangling reference reads as null; the reserved slot already is one.
        let obj = match self.source_doc.get_object(source_id) {
            Ok(obj) => obj.clone(),
            Err(lopdf::Error::ObjectNotFound(_)) => {
                log::debug!("Source object {:?} is missing, importing as null", source_id);
                return Ok(new_id);
            }
            Err(e) => return Err(e),
        };
        let new_obj = self.remap_references(obj)?;

        match self.target_doc.objects.get_mut(&new_id) {
            Some(target_obj) => *target_obj = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }

        Ok(new_id)
    }

    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => arr
                .into_iter()
                .map(|o| self.remap_references(o))
                .collect::<Result<Vec<_>, _>>()
                .map(Object::Array),
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.remap_dictionary(dict)?)),
            Object::Stream(mut stream) => {
                stream.dict = self.remap_dictionary(stream.dict)?;
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }

    fn remap_dictionary(&mut self, mut dict: Dictionary) -> Result<Dictionary, lopdf::Error> {
        for (_, value) in dict.iter_mut() {
            *value = self.remap_references(std::mem::replace(value, Object::Null))?;
        }
        Ok(dict)
    }
}

/// Copies a page dictionary with inherited attributes made explicit and the
/// link to its old parent removed.
fn detached_page(source: &Document, page_id: ObjectId) -> Result<Dictionary, lopdf::Error> {
    let mut page = source.get_dictionary(page_id)?.clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut guard = 0;
    while let Some(parent_id) = parent {
        // Malformed trees can loop; real ones are shallow.
        guard += 1;
        if guard > 64 {
            break;
        }
        let Ok(parent_dict) = source.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Ok(value) = parent_dict.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        parent = parent_dict.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    // Annotations point back at their page and often at the source tree; drop them.
    page.remove(b"Annots");
    Ok(page)
}

/// Copies every page of `source` into `target`, in page order, parented under
/// `parent` (the target's `Pages` node).
///
/// The target page tree is left untouched: the caller decides where in its
/// `Kids` array the returned page IDs go.
pub fn import_pages(
    target: &mut Document,
    source: &Document,
    parent: ObjectId,
) -> Result<Vec<ObjectId>, ComposerError> {
    // get_pages() is keyed by page number, so iteration is in page order.
    let source_pages = source.get_pages();
    if source_pages.is_empty() {
        return Err(ComposerError::NoPages);
    }

    let mut copier = ObjectCopier::new(source, target);
    let mut imported = Vec::with_capacity(source_pages.len());

    for (page_number, page_id) in source_pages {
        let page = detached_page(source, page_id)?;
        let mut page = copier.remap_dictionary(page)?;
        page.set("Parent", Object::Reference(parent));
        let new_id = copier.target_doc.add_object(Object::Dictionary(page));
        log::trace!("Imported source page {} as {:?}", page_number, new_id);
        imported.push(new_id);
    }

    Ok(imported)
}

/// Runs a full import of `source` into a scratch document and returns its
/// page count, so a broken attachment is caught before layout commits to it.
pub fn check_importable(source: &Document) -> Result<usize, ComposerError> {
    let mut scratch = Document::with_version("1.7");
    let parent = scratch.new_object_id();
    let imported = import_pages(&mut scratch, source, parent)?;
    Ok(imported.len())
}
