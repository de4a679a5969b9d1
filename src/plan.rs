// src/plan.rs

//! Chunk planning: derive byte-range work descriptors from a dump file.

/// One contiguous byte range of a dump file, processed by exactly one
/// execution unit.
///
/// `limit = None` means "read to the end of the file". The last chunk of a
/// file keeps the full configured limit even when fewer bytes remain; the
/// executable is responsible for not reading past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub seek: u64,
    pub limit: Option<u64>,
}

/// Plan the chunks covering `[0, file_len)`.
///
/// Seek offsets are consecutive multiples of `chunk_size` starting at 0.
/// `chunk_size = None` means "whole file": a single descriptor with no
/// limit. A zero-length file yields no chunks at all.
pub fn plan_chunks(file_len: u64, chunk_size: Option<u64>) -> Vec<ChunkDescriptor> {
    if file_len == 0 {
        return Vec::new();
    }

    let Some(size) = chunk_size else {
        return vec![ChunkDescriptor {
            seek: 0,
            limit: None,
        }];
    };
    // Config validation rejects a zero chunk size before we get here.
    assert!(size > 0, "chunk size must be positive");

    let mut chunks = Vec::with_capacity(file_len.div_ceil(size) as usize);
    let mut seek = 0;
    while seek < file_len {
        chunks.push(ChunkDescriptor {
            seek,
            limit: Some(size),
        });
        seek += size;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_larger_than_chunk_size_is_split_on_multiples() {
        let chunks = plan_chunks(2500, Some(1000));
        assert_eq!(
            chunks,
            vec![
                ChunkDescriptor { seek: 0, limit: Some(1000) },
                ChunkDescriptor { seek: 1000, limit: Some(1000) },
                ChunkDescriptor { seek: 2000, limit: Some(1000) },
            ]
        );
    }

    #[test]
    fn file_smaller_than_chunk_size_yields_one_chunk() {
        let chunks = plan_chunks(500, Some(1000));
        assert_eq!(
            chunks,
            vec![ChunkDescriptor { seek: 0, limit: Some(1000) }]
        );
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let chunks = plan_chunks(2000, Some(1000));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.last().unwrap().seek, 1000);
    }

    #[test]
    fn empty_file_yields_no_chunks() {
        assert!(plan_chunks(0, Some(1000)).is_empty());
        assert!(plan_chunks(0, None).is_empty());
    }

    #[test]
    fn unbounded_chunk_size_covers_whole_file_in_one_descriptor() {
        let chunks = plan_chunks(123_456, None);
        assert_eq!(
            chunks,
            vec![ChunkDescriptor { seek: 0, limit: None }]
        );
    }

    #[test]
    fn chunks_cover_the_file_without_gaps_or_overlaps() {
        for (len, size) in [(1u64, 1u64), (999, 1000), (1000, 1000), (1001, 1000), (7321, 64)] {
            let chunks = plan_chunks(len, Some(size));
            let mut expected_seek = 0;
            for chunk in &chunks {
                assert_eq!(chunk.seek, expected_seek);
                assert_eq!(chunk.limit, Some(size));
                expected_seek += size;
            }
            // Every byte is covered and the previous chunk stopped short of
            // the end.
            assert!(expected_seek >= len);
            assert!(expected_seek - size < len);
        }
    }
}
