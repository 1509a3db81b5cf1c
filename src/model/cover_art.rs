//! Cover art padding for the album-list background composite

/// Number of slots in the background composite.
pub const COVER_ART_SLOTS: usize = 8;

const GRADIENT: &str = "linear-gradient(rgba(0,0,0,0),rgba(0,0,0,0.8))";

/// Wrap an image url as a CSS `url('...')` reference.
pub fn css_url(image_url: &str) -> String {
    format!("url('{}')", image_url)
}

/// Pad (or trim) a sparse list of image references to exactly
/// [`COVER_ART_SLOTS`] entries.
///
/// The cursor walks the working sequence itself, so appended copies can be
/// read again. Hitting an absent slot rewinds the cursor to the start before
/// reading, which means an absent first element is repeated into every
/// remaining slot. Absent slots are kept: the composite is positional.
pub fn pad_cover_art(refs: Vec<Option<String>>) -> Vec<Option<String>> {
    let mut slots = refs;
    let mut i = 0;

    while slots.len() < COVER_ART_SLOTS {
        if slots.get(i).and_then(Option::as_ref).is_none() {
            i = 0;
        }
        let next = slots.get(i).cloned().flatten();
        slots.push(next);
        i += 1;
    }

    slots.truncate(COVER_ART_SLOTS);
    slots
}

/// Join padded slots into the background descriptor handed to the renderer.
/// Absent slots render as empty references.
pub fn background_descriptor(slots: &[Option<String>]) -> String {
    let mut descriptor = String::from(GRADIENT);
    for slot in slots {
        descriptor.push(',');
        descriptor.push_str(slot.as_deref().unwrap_or(""));
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[Option<&str>]) -> Vec<Option<String>> {
        names.iter().map(|n| n.map(str::to_string)).collect()
    }

    #[test]
    fn short_inputs_pad_to_eight() {
        for len in 1..COVER_ART_SLOTS {
            let input: Vec<Option<String>> = (0..len).map(|i| Some(format!("a{}", i))).collect();
            assert_eq!(pad_cover_art(input).len(), COVER_ART_SLOTS, "len {}", len);
        }
    }

    #[test]
    fn short_inputs_with_absent_entries_pad_to_eight() {
        for len in 1..COVER_ART_SLOTS {
            let input: Vec<Option<String>> = (0..len)
                .map(|i| if i % 2 == 1 { None } else { Some(format!("a{}", i)) })
                .collect();
            assert_eq!(pad_cover_art(input).len(), COVER_ART_SLOTS, "len {}", len);
        }
    }

    #[test]
    fn long_inputs_keep_first_eight() {
        for len in COVER_ART_SLOTS..COVER_ART_SLOTS + 4 {
            let input: Vec<Option<String>> = (0..len).map(|i| Some(format!("a{}", i))).collect();
            let expected = input[..COVER_ART_SLOTS].to_vec();
            assert_eq!(pad_cover_art(input), expected);
        }
    }

    #[test]
    fn cycles_through_full_inputs() {
        let padded = pad_cover_art(refs(&[Some("a"), Some("b"), Some("c")]));
        assert_eq!(
            padded,
            refs(&[Some("a"), Some("b"), Some("c"), Some("a"), Some("b"), Some("c"), Some("a"), Some("b")])
        );
    }

    #[test]
    fn absent_entry_rewinds_cursor() {
        // The cursor never gets past the hole, so "b" is never repeated.
        let padded = pad_cover_art(refs(&[Some("a"), None, Some("b")]));
        assert_eq!(
            padded,
            refs(&[Some("a"), None, Some("b"), Some("a"), Some("a"), Some("a"), Some("a"), Some("a")])
        );
    }

    #[test]
    fn absent_only_source_propagates() {
        assert_eq!(pad_cover_art(refs(&[None])), vec![None; COVER_ART_SLOTS]);
        assert_eq!(pad_cover_art(Vec::new()), vec![None; COVER_ART_SLOTS]);
    }

    #[test]
    fn descriptor_format() {
        let slots = pad_cover_art(vec![Some(css_url("x.jpg"))]);
        let descriptor = background_descriptor(&slots);
        assert!(descriptor.starts_with("linear-gradient(rgba(0,0,0,0),rgba(0,0,0,0.8)),url('x.jpg'),"));
        assert_eq!(descriptor.matches("url('x.jpg')").count(), COVER_ART_SLOTS);
    }

    #[test]
    fn descriptor_keeps_absent_positions() {
        let descriptor = background_descriptor(&[Some("a".into()), None, Some("b".into())]);
        assert_eq!(descriptor, format!("{},a,,b", GRADIENT));
    }
}
