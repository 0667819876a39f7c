use glam::{Mat4, Vec3};

use super::*;
use crate::render::{DrawCmd, DrawList};

fn cube_part(id: u32) -> TriPart {
    TriPart::new(PartId(id), cube_mesh())
}

#[test]
fn shape_tables_are_well_formed() {
    for (mesh, triangles) in [
        (cube_mesh(), 12),
        (square_mesh(), 2),
        (hollow_cube_face_mesh(), 8),
        (two_way_arrow_mesh(), 24),
    ] {
        assert_eq!(mesh.vertex_indices.len(), triangles * 4);
        assert_eq!(mesh.normal_indices.len(), mesh.vertex_indices.len());
        assert_eq!(mesh.normals.len(), triangles);
        for normal in &mesh.normals {
            assert!((normal.length() - 1.0).abs() < 1.0e-5);
        }
    }
}

#[test]
fn shape_tables_are_shared() {
    let a = cube_mesh();
    let b = cube_mesh();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn ray_through_cube_hits_front_and_back() {
    let part = cube_part(1);
    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 2);
    let mut ts: Vec<f32> = hits.iter().map(|h| h.t).collect();
    ts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((ts[0] - 4.0).abs() < 1.0e-3);
    assert!((ts[1] - 6.0).abs() < 1.0e-3);
    for hit in &hits {
        assert_eq!(hit.part, PartId(1));
        assert!(hit.manip.is_none());
    }
}

#[test]
fn hits_behind_ray_origin_are_discarded() {
    let part = cube_part(1);
    let mut hits = Vec::new();
    // Origin inside the cube: only the surface ahead of the ray counts.
    part.intersect_ray(Vec3::new(0.3, 0.2, 0.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 1);
    assert!(hits[0].t >= 0.0);
    assert!((hits[0].point.z - -1.0).abs() < 1.0e-3);
}

#[test]
fn non_pickable_part_reports_nothing() {
    let mut part = cube_part(1);
    part.set_pickable(false);
    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn invisible_part_still_picks_but_does_not_render() {
    let mut part = cube_part(1);
    part.set_visible(false);
    let mut out = DrawList::new();
    part.render(&mut out);
    assert!(out.is_empty());

    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 2);
}

#[test]
fn transform_moves_pick_geometry() {
    let mut part = cube_part(1);
    part.set_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert!(hits.is_empty());
    part.intersect_ray(Vec3::new(10.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 2);
}

#[test]
fn normals_stay_unit_length_under_scale() {
    let mut part = cube_part(1);
    part.set_transform(Mat4::from_scale(Vec3::new(3.0, 0.5, 7.0)));
    let mut out = DrawList::new();
    part.render(&mut out);
    let DrawCmd::Triangles { normals, .. } = &out.cmds()[0] else {
        panic!("expected a triangle batch");
    };
    for n in normals {
        let len = Vec3::from(*n).length();
        assert!((len - 1.0).abs() < 1.0e-4);
    }
}

#[test]
fn highlight_switches_render_color() {
    let mut part = cube_part(1);
    part.set_color([0.1, 0.2, 0.3]);
    part.set_highlight_color([0.9, 0.9, 0.0]);
    part.highlight();
    let mut out = DrawList::new();
    part.render(&mut out);
    let DrawCmd::Triangles { color, .. } = &out.cmds()[0] else {
        panic!("expected a triangle batch");
    };
    assert_eq!(*color, [0.9, 0.9, 0.0]);

    part.clear_highlight();
    let mut out = DrawList::new();
    part.render(&mut out);
    let DrawCmd::Triangles { color, .. } = &out.cmds()[0] else {
        panic!("expected a triangle batch");
    };
    assert_eq!(*color, [0.1, 0.2, 0.3]);
}

#[test]
fn line_seg_never_hits() {
    let part: Part = LineSegPart::new(PartId(2)).into();
    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert!(hits.is_empty());
    assert!(!part.pickable());
}

#[test]
fn group_relabels_child_hits() {
    let mut group = GroupPart::new(PartId(9));
    group.add_part(cube_part(5));
    let mut hits = Vec::new();
    group.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert_eq!(hit.part, PartId(9));
    }
}

#[test]
fn group_relabels_only_its_own_hits() {
    let part = cube_part(5);
    let mut hits = Vec::new();
    part.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    let existing = hits.len();

    let mut group = GroupPart::new(PartId(9));
    group.add_part(cube_part(6));
    group.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    for hit in &hits[..existing] {
        assert_eq!(hit.part, PartId(5));
    }
    for hit in &hits[existing..] {
        assert_eq!(hit.part, PartId(9));
    }
}

#[test]
fn non_pickable_group_skips_children_entirely() {
    let mut group = GroupPart::new(PartId(9));
    group.add_part(cube_part(5));
    group.set_pickable(false);
    let mut hits = Vec::new();
    group.intersect_ray(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn invisible_group_renders_nothing() {
    let mut group = GroupPart::new(PartId(9));
    group.add_part(cube_part(5));
    group.set_visible(false);
    let mut out = DrawList::new();
    group.render(&mut out);
    assert!(out.is_empty());
}

#[test]
fn offset_transform_composes_before_external_transform() {
    let offset = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
    let mut group = GroupPart::with_offset(PartId(9), offset);
    group.add_part(cube_part(5));
    // External transform moves along x; the offset moves children up.
    group.set_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    let mut hits = Vec::new();
    group.intersect_ray(Vec3::new(10.3, 5.2, 5.0), Vec3::new(0.0, 0.0, -1.0), &mut hits);
    assert_eq!(hits.len(), 2);
}

#[test]
fn group_part_management() {
    let mut group = GroupPart::new(PartId(9));
    let idx = group.add_part(cube_part(5));
    assert_eq!(idx, 0);
    assert_eq!(group.num_parts(), 1);
    assert_eq!(group.find_part(PartId(5)), Some(0));
    assert!(group.find_part(PartId(42)).is_none());
    assert!(group.remove_part(3).is_none());
    let removed = group.remove_part(0).unwrap();
    assert_eq!(removed.id(), PartId(5));
    assert_eq!(group.num_parts(), 0);
}
