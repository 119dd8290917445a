//! One-call registration for every kind in the [`Annotation`] catalog.

use crate::builder::SpanBuilder;
use crate::error::Error;
use crate::resolve::Resolver;
use crate::rich::{Annotation, FontStyle, VerticalAlign};
use std::rc::Rc;

impl<E> SpanBuilder<Annotation, E> {
    /// Colors the text of `indices` with the color `color_id` resolves to.
    pub fn foreground_color<I, R>(
        &mut self,
        indices: I,
        resolver: &Rc<R>,
        color_id: &str,
    ) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
        R: Resolver + 'static,
        R::Error: Into<E>,
    {
        let resolver = Rc::clone(resolver);
        let id = color_id.to_string();
        self.try_add_annotation(indices, move || {
            let color = resolver.color(&id).map_err(Into::<E>::into)?;
            Ok(Annotation::ForegroundColor { color })
        })
    }

    /// Paints the background of `indices` with the color `color_id` resolves to.
    pub fn background_color<I, R>(
        &mut self,
        indices: I,
        resolver: &Rc<R>,
        color_id: &str,
    ) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
        R: Resolver + 'static,
        R::Error: Into<E>,
    {
        let resolver = Rc::clone(resolver);
        let id = color_id.to_string();
        self.try_add_annotation(indices, move || {
            let color = resolver.color(&id).map_err(Into::<E>::into)?;
            Ok(Annotation::BackgroundColor { color })
        })
    }

    /// Replaces the text of `indices` with the image `image_id` resolves to.
    pub fn image<I, R>(
        &mut self,
        indices: I,
        resolver: &Rc<R>,
        image_id: &str,
        align: VerticalAlign,
    ) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
        R: Resolver + 'static,
        R::Error: Into<E>,
    {
        let resolver = Rc::clone(resolver);
        let id = image_id.to_string();
        self.try_add_annotation(indices, move || {
            let image = resolver.image(&id).map_err(Into::<E>::into)?;
            Ok(Annotation::Image { image, align })
        })
    }

    /// Makes `indices` interactive; the host dispatches on `action`.
    pub fn click<I>(&mut self, indices: I, action: &str) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        let action = action.to_string();
        self.add_annotation(indices, move || Annotation::Click {
            action: action.clone(),
        })
    }

    pub fn strikethrough<I>(&mut self, indices: I) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, || Annotation::Strikethrough)
    }

    pub fn underline<I>(&mut self, indices: I) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, || Annotation::Underline)
    }

    pub fn style<I>(&mut self, indices: I, style: FontStyle) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, move || Annotation::Style { style })
    }

    pub fn subscript<I>(&mut self, indices: I) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, || Annotation::Subscript)
    }

    pub fn superscript<I>(&mut self, indices: I) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, || Annotation::Superscript)
    }

    pub fn typeface<I>(&mut self, indices: I, family: &str) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        let family = family.to_string();
        self.add_annotation(indices, move || Annotation::Typeface {
            family: family.clone(),
        })
    }

    pub fn url<I>(&mut self, indices: I, url: &str) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        let url = url.to_string();
        self.add_annotation(indices, move || Annotation::Url { url: url.clone() })
    }

    pub fn scale_x<I>(&mut self, indices: I, proportion: f32) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, move || Annotation::ScaleX { proportion })
    }

    /// Sets the font size of `indices` to `size` pixels.
    pub fn absolute_size<I>(&mut self, indices: I, size: u32) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, move || Annotation::AbsoluteSize { size })
    }

    pub fn relative_size<I>(&mut self, indices: I, proportion: f32) -> Result<(), Error<E>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_annotation(indices, move || Annotation::RelativeSize { proportion })
    }
}
