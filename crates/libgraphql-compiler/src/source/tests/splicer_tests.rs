use crate::source::PrintedRegion;
use crate::source::RegionOffsets;
use crate::source::RegionRole;
use crate::source::SpliceError;
use crate::source::reconcile;
use crate::source::splice;
use crate::source::split_regions;
use proptest::prelude::*;

fn printed(role: RegionRole, offsets: RegionOffsets, text: &str) -> PrintedRegion {
    PrintedRegion {
        role,
        offsets,
        text: text.to_string(),
    }
}

#[test]
fn splice_preserves_tags_and_surroundings() {
    let original = "<h1>x</h1>\n<script lang=\"ts\">let a = 1</script>\n<p>y</p>";
    let start = original.find("<script").unwrap();
    let end = original.find("</script>").unwrap() + "</script>".len() - 1;

    let spliced = splice(original, RegionOffsets::new(start, end), "let b = 2").unwrap();

    assert_eq!(
        spliced,
        "<h1>x</h1>\n<script lang=\"ts\">let b = 2</script>\n<p>y</p>",
    );
}

#[test]
fn splice_with_content_containing_angle_brackets() {
    let original = "<script>if (a < b) {}</script>";

    let spliced = splice(
        original,
        RegionOffsets::new(0, original.len() - 1),
        "if (a > b) {}",
    ).unwrap();

    assert_eq!(spliced, "<script>if (a > b) {}</script>");
}

#[test]
fn splice_with_bad_offsets() {
    let original = "<script>a</script>";

    assert_eq!(
        splice(original, RegionOffsets::new(0, 100), "b").unwrap_err(),
        SpliceError::OffsetsOutOfBounds { start: 0, end: 100, len: 18 },
    );
    // `end` points before the opening tag is closed.
    assert_eq!(
        splice(original, RegionOffsets::new(0, 5), "b").unwrap_err(),
        SpliceError::OpeningTagNotClosed { start: 0, end: 5 },
    );
}

#[test]
fn reconcile_without_regions_returns_original() {
    let original = "<h1>static</h1>";

    assert_eq!(reconcile(original, None, None).unwrap(), original);
}

#[test]
fn reconcile_inserts_absent_module_region() {
    let original = "<script>let a</script>";
    let module = printed(RegionRole::Module, RegionOffsets::ABSENT, "\nexport const b = 1\n");
    let instance = printed(
        RegionRole::Instance,
        RegionOffsets::new(0, original.len() - 1),
        "let c",
    );

    let code = reconcile(original, Some(module), Some(instance)).unwrap();

    assert_eq!(
        code,
        "<script context=\"module\">\nexport const b = 1\n</script>\n<script>let c</script>",
    );
}

#[test]
fn reconcile_inserts_both_absent_regions_module_first() {
    let code = reconcile(
        "<p/>",
        Some(printed(RegionRole::Module, RegionOffsets::ABSENT, "m")),
        Some(printed(RegionRole::Instance, RegionOffsets::ABSENT, "i")),
    ).unwrap();

    assert_eq!(code, "<script context=\"module\">m</script>\n<script>i</script>\n<p/>");
}

fn build_file(module_first: bool, module: &str, instance: &str, markup: &str) -> String {
    let module_block = format!("<script context=\"module\">{module}</script>");
    let instance_block = format!("<script>{instance}</script>");
    if module_first {
        format!("{module_block}\n{markup}{instance_block}\n{markup}")
    } else {
        format!("{instance_block}\n{markup}{module_block}\n{markup}")
    }
}

proptest! {
    #[test]
    fn splice_order_is_not_observable(
        module_first in any::<bool>(),
        module in "[a-z =;\n]{0,24}",
        instance in "[a-z =;\n]{0,24}",
        markup in "[a-z {}\n]{0,24}",
        new_module in "[a-z =;\n]{0,32}",
        new_instance in "[a-z =;\n]{0,32}",
    ) {
        let original = build_file(module_first, &module, &instance, &markup);
        let regions = split_regions(&original, "graphql").unwrap();
        let module_offsets = regions.module.unwrap().offsets();
        let instance_offsets = regions.instance.unwrap().offsets();

        let code = reconcile(
            &original,
            Some(printed(RegionRole::Module, module_offsets, &new_module)),
            Some(printed(RegionRole::Instance, instance_offsets, &new_instance)),
        ).unwrap();

        prop_assert_eq!(
            code,
            build_file(module_first, &new_module, &new_instance, &markup),
        );
    }
}
