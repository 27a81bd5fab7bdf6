use rayon::prelude::*;

use sobel_image::Image;

/// Apply a function to each sample of two images in parallel, writing into a third.
///
/// Work is split by rows. All three images are expected to share the same size.
pub fn par_iter_rows_val_two<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &mut Image<T3, C>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    let row_stride = C * src1.cols();
    if row_stride == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(row_stride)
        .zip(src2.as_slice().par_chunks_exact(row_stride))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row_stride))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_val, src2_val), dst_val)| {
                    f(src1_val, src2_val, dst_val);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use sobel_image::ImageError;

    #[test]
    fn test_par_iter_rows_val_two() -> Result<(), ImageError> {
        let a = Image::<i32, 2>::new([2, 2].into(), (0..8).collect())?;
        let b = Image::<i32, 2>::from_size_val([2, 2].into(), 10)?;
        let mut dst = Image::<i32, 2>::from_size_val([2, 2].into(), 0)?;

        par_iter_rows_val_two(&a, &b, &mut dst, |x, y, out| *out = x + y);
        assert_eq!(dst.as_slice(), &[10, 11, 12, 13, 14, 15, 16, 17]);

        Ok(())
    }
}
