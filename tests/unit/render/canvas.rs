//! Tests for full and incremental reconstruction of the quadtree

#[cfg(test)]
mod tests {
    use greedyquads::algorithm::executor::{
        ChannelLayout, GreedyRefiner, RefinementState, SplitRecord, UnsplittablePolicy,
    };
    use greedyquads::io::image::root_region;
    use greedyquads::render::{Canvas, RenderStyle, render_tree};
    use greedyquads::spatial::{QuadTree, Region};
    use image::{Rgba, RgbaImage};
    use ndarray::Array3;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn noisy_image(size: u32, seed: u64) -> RgbaImage {
        let mut rng = StdRng::seed_from_u64(seed);
        RgbaImage::from_fn(size, size, |_, _| {
            Rgba([rng.random(), rng.random(), rng.random(), 255])
        })
    }

    fn quadrant_image() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgba([255, 0, 0, 255]),
            (false, true) => Rgba([0, 255, 0, 255]),
            (true, false) => Rgba([0, 0, 255, 255]),
            (false, false) => Rgba([9, 9, 9, 255]),
        })
    }

    // Tests an unsplit tree renders as the overall mean
    // Verified by rendering the top-left pixel value
    #[test]
    fn test_render_root_only() {
        let tree = QuadTree::from_root(root_region(&quadrant_image(), ChannelLayout::Rgb).unwrap());
        let image = render_tree(&tree, &RenderStyle::default()).unwrap();

        assert_eq!(image.dimensions(), (4, 4));
        // Every channel averages four saturated pixels and four at 9
        assert!(image.pixels().all(|p| *p == Rgba([66, 66, 66, 255])));
    }

    // Tests one split of a four-color image reproduces it exactly
    // Verified by swapping child placement offsets
    #[test]
    fn test_render_reproduces_flat_quadrants() {
        let source = quadrant_image();
        let mut refiner = GreedyRefiner::new(
            root_region(&source, ChannelLayout::Rgb).unwrap(),
            1,
            UnsplittablePolicy::HaltAll,
        );
        refiner.run(|_, _| Ok(())).unwrap();

        let image = render_tree(refiner.tree(), &RenderStyle::default()).unwrap();
        assert_eq!(image, source);
    }

    // Tests a solid image splits into zero-error children that render identically
    // Verified by adding noise to the fill color
    #[test]
    fn test_render_solid_image() {
        let source = RgbaImage::from_pixel(4, 4, Rgba([12, 34, 56, 255]));
        let mut refiner = GreedyRefiner::new(
            root_region(&source, ChannelLayout::Rgb).unwrap(),
            1,
            UnsplittablePolicy::HaltAll,
        );
        refiner.run(|_, _| Ok(())).unwrap();

        for leaf in refiner.tree().leaves() {
            let region = refiner.tree().region(leaf).unwrap();
            assert!(region.error_score().abs() < 1e-12);
            assert_eq!(region.fill_color(), [12, 34, 56, 255]);
        }
        let image = render_tree(refiner.tree(), &RenderStyle::default()).unwrap();
        assert_eq!(image, source);
    }

    // Tests fully refined trees reproduce the source pixel for pixel
    // Verified by truncating means one unit low
    #[test]
    fn test_render_full_refinement_is_lossless() {
        let source = noisy_image(8, 1);
        let mut refiner = GreedyRefiner::new(
            root_region(&source, ChannelLayout::Rgba).unwrap(),
            21,
            UnsplittablePolicy::SkipRegion,
        );
        assert_eq!(refiner.run(|_, _| Ok(())).unwrap(), RefinementState::Done);

        let image = render_tree(refiner.tree(), &RenderStyle::default()).unwrap();
        assert_eq!(image, source);
    }

    // Tests incremental painting matches a full re-render after every split
    // Verified by painting the parent instead of its children
    #[test]
    fn test_canvas_matches_full_render() {
        let style = RenderStyle {
            border: true,
            ellipse: true,
            color: Rgba([200, 10, 10, 255]),
        };
        let mut refiner = GreedyRefiner::new(
            root_region(&noisy_image(16, 2), ChannelLayout::Rgb).unwrap(),
            40,
            UnsplittablePolicy::HaltAll,
        );
        let mut canvas = Canvas::new(refiner.tree(), style).unwrap();
        assert_eq!(canvas.style(), &style);

        refiner
            .run(|tree, record| {
                canvas.apply_split(tree, record)?;
                assert_eq!(canvas.image(), &render_tree(tree, &style)?);
                Ok(())
            })
            .unwrap();

        let final_render = render_tree(refiner.tree(), &style).unwrap();
        assert_eq!(canvas.into_image(), final_render);
    }

    // Tests roots away from the origin still paint at buffer zero
    // Verified by using absolute coordinates in incremental painting
    #[test]
    fn test_canvas_offset_root() {
        let samples = Array3::from_shape_fn((4, 4, 3), |(r, c, ch)| (r * 50 + c * 10 + ch) as u8);
        let mut tree = QuadTree::from_root(Region::new([64, 32], samples).unwrap());
        let style = RenderStyle::default();
        let mut canvas = Canvas::new(&tree, style).unwrap();

        let parent = tree.root();
        let children = tree.split(parent).unwrap();
        let record = SplitRecord {
            iteration: 1,
            parent,
            children,
        };
        canvas.apply_split(&tree, &record).unwrap();

        assert_eq!(canvas.image().dimensions(), (4, 4));
        assert_eq!(canvas.image(), &render_tree(&tree, &style).unwrap());
    }
}
