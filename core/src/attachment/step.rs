// stockroom/src/attachment/step.rs

use std::fmt;

use crate::blob::ImageFile;

/// Which product field an upload feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
  Primary,
  /// Position within the submitted gallery.
  Gallery(usize),
}

impl fmt::Display for ImageSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ImageSlot::Primary => f.write_str("primary"),
      ImageSlot::Gallery(position) => write!(f, "gallery[{position}]"),
    }
  }
}

/// One upload within a run. `index` is the step's position in the run.
#[derive(Debug, Clone, Copy)]
pub struct UploadStep<'a> {
  pub index: usize,
  pub slot: ImageSlot,
  pub file: &'a ImageFile,
}

/// Lays out the steps for a run: the primary file, if any, then the gallery in order.
pub(crate) fn plan<'a>(primary: Option<&'a ImageFile>, gallery: &'a [ImageFile]) -> Vec<UploadStep<'a>> {
  primary
    .map(|file| (ImageSlot::Primary, file))
    .into_iter()
    .chain(gallery.iter().enumerate().map(|(pos, file)| (ImageSlot::Gallery(pos), file)))
    .enumerate()
    .map(|(index, (slot, file))| UploadStep { index, slot, file })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn primary_runs_before_gallery_in_submission_order() {
    let primary = ImageFile::new("p.png", None, &b"p"[..]);
    let gallery = vec![
      ImageFile::new("g0.png", None, &b"0"[..]),
      ImageFile::new("g1.png", None, &b"1"[..]),
    ];
    let steps = plan(Some(&primary), &gallery);
    let layout: Vec<_> = steps.iter().map(|s| (s.index, s.slot, s.file.file_name.as_str())).collect();
    assert_eq!(
      layout,
      vec![
        (0, ImageSlot::Primary, "p.png"),
        (1, ImageSlot::Gallery(0), "g0.png"),
        (2, ImageSlot::Gallery(1), "g1.png"),
      ]
    );
  }

  #[test]
  fn slots_display_like_field_paths() {
    assert_eq!(ImageSlot::Primary.to_string(), "primary");
    assert_eq!(ImageSlot::Gallery(3).to_string(), "gallery[3]");
  }
}
