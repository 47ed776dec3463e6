use nalgebra as na;

/// Integer pixel vertex as picked on the calibration image
pub type Vertex = (i32, i32);

/// Ray casting test against a closed polygon, edges are walked in order with
/// the last vertex wrapping back to the first.
///
/// The half-open `y > min && y <= max` interval keeps shared vertices from
/// toggling twice. Horizontal edges lying on the ray are never counted.
pub fn point_in_polygon(p: na::Point2<f32>, poly: &[Vertex]) -> bool {
    let n = poly.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut p1 = vertex_point(poly[0]);
    let mut xints = 0.0;

    for i in 1..=n {
        let p2 = vertex_point(poly[i % n]);

        if p.y > f32::min(p1.y, p2.y) && p.y <= f32::max(p1.y, p2.y) && p.x <= f32::max(p1.x, p2.x)
        {
            if p1.y != p2.y {
                xints = (p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            }

            if p1.x == p2.x || p.x <= xints {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}

#[inline(always)]
fn vertex_point(v: Vertex) -> na::Point2<f32> {
    na::Point2::new(v.0 as f32, v.1 as f32)
}
