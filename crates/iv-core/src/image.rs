use crate::Error;
use crate::point::Point;

/// RGB triple with 8-bit channels.
pub type Rgb8 = [u8; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    /// Writes `value` at `p` if it lies inside the image.
    pub fn put(&mut self, p: Point, value: T) -> bool {
        match self.index_of(p) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    fn index_of(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl Image<Rgb8> {
    /// Builds an RGB image from interleaved 8-bit RGB or RGBA bytes.
    ///
    /// Alpha is dropped: stroke colors are always reported opaque.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        bytes: &[u8],
    ) -> Result<Self, Error> {
        if channels != 3 && channels != 4 {
            return Err(Error::UnsupportedChannels(channels));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: bytes.len(),
            })?;
        if bytes.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let data = bytes
            .chunks_exact(channels)
            .map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.stride + x;
        self.data.get(idx)
    }

    /// Pixel at an integer point; negative or out-of-range points are absent.
    pub fn at(&self, p: Point) -> Option<&'a T> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.get(p.x as usize, p.y as usize)
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, Rgb8};
    use crate::Error;
    use crate::point::Point;

    #[test]
    fn view_indexing_with_stride() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);
        assert_eq!(view.at(Point::new(0, 1)), Some(&4));
        assert_eq!(view.at(Point::new(-1, 0)), None);
    }

    #[test]
    fn stride_and_size_validation() {
        let data = vec![0u8; 5];
        assert_eq!(
            ImageView::from_slice(3, 2, 2, &data).unwrap_err(),
            Error::InvalidStride
        );
        assert_eq!(
            ImageView::from_slice(3, 2, 3, &data).unwrap_err(),
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn interleaved_rgba_drops_alpha() {
        let bytes = [10u8, 20, 30, 255, 40, 50, 60, 0];
        let img = Image::<Rgb8>::from_interleaved(2, 1, 4, &bytes).expect("valid rgba");
        assert_eq!(img.data(), &[[10, 20, 30], [40, 50, 60]]);

        assert_eq!(
            Image::<Rgb8>::from_interleaved(2, 1, 2, &bytes[..4]).unwrap_err(),
            Error::UnsupportedChannels(2)
        );
        assert_eq!(
            Image::<Rgb8>::from_interleaved(2, 2, 3, &bytes).unwrap_err(),
            Error::SizeMismatch {
                expected: 12,
                actual: 8
            }
        );
    }

    #[test]
    fn put_ignores_outside_points() {
        let mut img = Image::new_fill(2, 2, 0u8);
        assert!(img.put(Point::new(1, 1), 7));
        assert!(!img.put(Point::new(2, 0), 7));
        assert!(!img.put(Point::new(-1, 0), 7));
        assert_eq!(img.data(), &[0, 0, 0, 7]);
    }
}
