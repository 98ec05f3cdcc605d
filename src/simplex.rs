use glam::Vec3;

use crate::support::SupportPoint;

/// `a · (b × c)`, the scalar triple product used throughout the
/// sub-simplex region tests.
fn triple_product(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    a.dot(b.cross(c))
}

fn different_sign(a: f32, b: f32) -> bool {
    (a < 0.0) != (b < 0.0)
}

/// An ordered collection of 1 to 4 simplex vertices. Each non-`Point`
/// variant carries the `divisor` that normalises its vertices' `weight`
/// fields into barycentric coordinates.
///
/// A tagged variant rather than a single struct with a `count` field, so
/// that "impossible" branches (a `Tetrahedron`'s fifth vertex, a `Point`'s
/// divisor) are unrepresentable instead of merely unasserted.
#[derive(Debug, Clone)]
pub enum Simplex {
    Point([SupportPoint; 1]),
    Line {
        verts: [SupportPoint; 2],
        divisor: f32,
    },
    Triangle {
        verts: [SupportPoint; 3],
        divisor: f32,
    },
    Tetrahedron {
        verts: [SupportPoint; 4],
        divisor: f32,
    },
}

/// Outcome of a sub-simplex solve pass.
#[derive(Debug)]
pub enum SolveOutcome {
    Solved(Simplex),
    /// The simplex was degenerate (zero divisor): coplanar tetrahedron,
    /// collinear triangle, or coincident vertices.
    Degenerate,
}

impl Simplex {
    pub fn seed(vertex: SupportPoint) -> Self {
        let mut vertex = vertex;
        vertex.weight = 1.0;
        Simplex::Point([vertex])
    }

    pub fn count(&self) -> usize {
        match self {
            Simplex::Point(_) => 1,
            Simplex::Line { .. } => 2,
            Simplex::Triangle { .. } => 3,
            Simplex::Tetrahedron { .. } => 4,
        }
    }

    pub fn points(&self) -> &[SupportPoint] {
        match self {
            Simplex::Point(v) => v,
            Simplex::Line { verts, .. } => verts,
            Simplex::Triangle { verts, .. } => verts,
            Simplex::Tetrahedron { verts, .. } => verts,
        }
    }

    pub fn divisor(&self) -> f32 {
        match self {
            Simplex::Point(_) => 1.0,
            Simplex::Line { divisor, .. } => *divisor,
            Simplex::Triangle { divisor, .. } => *divisor,
            Simplex::Tetrahedron { divisor, .. } => *divisor,
        }
    }

    /// Grows the simplex by one vertex. Panics if already a `Tetrahedron` —
    /// the GJK driver never pushes past count 4 (it reports overlap first).
    pub fn push(&mut self, p: SupportPoint) {
        *self = match self {
            Simplex::Point([a]) => Simplex::Line {
                verts: [*a, p],
                divisor: 0.0,
            },
            Simplex::Line { verts: [a, b], .. } => Simplex::Triangle {
                verts: [*a, *b, p],
                divisor: 0.0,
            },
            Simplex::Triangle {
                verts: [a, b, c], ..
            } => Simplex::Tetrahedron {
                verts: [*a, *b, *c, p],
                divisor: 0.0,
            },
            Simplex::Tetrahedron { .. } => unreachable!("simplex cannot exceed 4 vertices"),
        };
    }

    /// Reduces the simplex to the feature closest to `query`, writing
    /// `weight`/`divisor` on the retained vertices. Dispatches to the solver
    /// matching the current vertex count; a `Point` simplex is already
    /// solved (weight 1, divisor 1).
    pub fn solve(self, query: Vec3) -> SolveOutcome {
        match self {
            Simplex::Point(_) => SolveOutcome::Solved(self),
            Simplex::Line { verts, .. } => solve_line(verts, query),
            Simplex::Triangle { verts, .. } => solve_triangle(verts, query),
            Simplex::Tetrahedron { verts, .. } => solve_tetrahedron(verts, query),
        }
    }
}

fn vertex_only(mut v: SupportPoint) -> Simplex {
    v.weight = 1.0;
    Simplex::Point([v])
}

/// Solve-Line: project `query` onto segment AB.
fn solve_line(verts: [SupportPoint; 2], query: Vec3) -> SolveOutcome {
    let [mut a, mut b] = verts;
    let ab = b.point - a.point;

    let u = (query - b.point).dot(a.point - b.point);
    let v = (query - a.point).dot(b.point - a.point);

    if v <= 0.0 {
        return SolveOutcome::Solved(vertex_only(a));
    }
    if u <= 0.0 {
        return SolveOutcome::Solved(vertex_only(b));
    }

    let divisor = ab.length_squared();
    if divisor <= f32::EPSILON {
        return SolveOutcome::Degenerate;
    }

    a.weight = u;
    b.weight = v;
    SolveOutcome::Solved(Simplex::Line {
        verts: [a, b],
        divisor,
    })
}

/// Solve-Triangle: classify `query` into one of the triangle's seven
/// Voronoi regions.
fn solve_triangle(verts: [SupportPoint; 3], query: Vec3) -> SolveOutcome {
    let [mut a, mut b, mut c] = verts;

    let ao = query - a.point;
    let bo = query - b.point;
    let co = query - c.point;
    let ab = b.point - a.point;
    let ac = c.point - a.point;
    let ba = a.point - b.point;
    let bc = c.point - b.point;
    let ca = a.point - c.point;
    let cb = b.point - c.point;

    let u_ab = bo.dot(ba);
    let v_ab = ao.dot(ab);

    let u_bc = co.dot(cb);
    let v_bc = bo.dot(bc);

    let u_ca = ao.dot(ac);
    let v_ca = co.dot(ca);

    // Vertex regions.
    if v_ab <= 0.0 && u_ca <= 0.0 {
        return SolveOutcome::Solved(vertex_only(a));
    }
    if u_ab <= 0.0 && v_bc <= 0.0 {
        return SolveOutcome::Solved(vertex_only(b));
    }
    if v_ca <= 0.0 && u_bc <= 0.0 {
        return SolveOutcome::Solved(vertex_only(c));
    }

    // Must be in region AB, AC, BC, or ABC.
    let n = ab.cross(ac);
    let area = n.length_squared();
    if area <= f32::EPSILON {
        return SolveOutcome::Degenerate;
    }

    let u_abc = bo.cross(co).dot(n); // opposite A, region BC
    let v_abc = co.cross(ao).dot(n); // opposite B, region CA
    let w_abc = ao.cross(bo).dot(n); // opposite C, region AB

    if u_ab > 0.0 && v_ab > 0.0 && different_sign(w_abc, area) {
        a.weight = u_ab;
        b.weight = v_ab;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [a, b],
            divisor: ab.length_squared(),
        });
    }

    if u_bc > 0.0 && v_bc > 0.0 && different_sign(u_abc, area) {
        b.weight = u_bc;
        c.weight = v_bc;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [b, c],
            divisor: bc.length_squared(),
        });
    }

    if u_ca > 0.0 && v_ca > 0.0 && different_sign(v_abc, area) {
        c.weight = u_ca;
        a.weight = v_ca;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [c, a],
            divisor: ca.length_squared(),
        });
    }

    // Interior: all three positive.
    a.weight = u_abc;
    b.weight = v_abc;
    c.weight = w_abc;
    SolveOutcome::Solved(Simplex::Triangle {
        verts: [a, b, c],
        divisor: area,
    })
}

/// Solve-Tetrahedron: 15 regions (4 vertex, 6 edge, 4 face, 1 interior),
/// tested in that order.
fn solve_tetrahedron(verts: [SupportPoint; 4], query: Vec3) -> SolveOutcome {
    let [mut a, mut b, mut c, mut d] = verts;

    let ap = query - a.point;
    let bp = query - b.point;
    let cp = query - c.point;
    let dp = query - d.point;

    let ab = b.point - a.point;
    let ac = c.point - a.point;
    let ad = d.point - a.point;

    let ba = a.point - b.point;
    let bc = c.point - b.point;
    let bd = d.point - b.point;

    let ca = a.point - c.point;
    let cd = d.point - c.point;

    let da = a.point - d.point;
    let db = b.point - d.point;
    let dc = c.point - d.point;

    let u_ab = bp.dot(ba);
    let v_ab = ap.dot(ab);

    let u_bc = cp.dot(cb(bc));
    let v_bc = bp.dot(bc);

    let u_ca = ap.dot(ac);
    let v_ca = cp.dot(ca);

    let u_ad = dp.dot(da);
    let v_ad = ap.dot(ad);

    let u_dc = dp.dot(cd);
    let v_dc = cp.dot(dc);

    let u_bd = dp.dot(db);
    let v_bd = bp.dot(bd);

    // Vertex regions.
    if v_ab <= 0.0 && u_ca <= 0.0 && v_ad <= 0.0 {
        return SolveOutcome::Solved(vertex_only(a));
    }
    if u_ab <= 0.0 && v_bc <= 0.0 && v_bd <= 0.0 {
        return SolveOutcome::Solved(vertex_only(b));
    }
    if u_ca <= 0.0 && v_bc <= 0.0 && v_dc <= 0.0 {
        return SolveOutcome::Solved(vertex_only(c));
    }
    if u_bd <= 0.0 && v_dc <= 0.0 && u_ad <= 0.0 {
        return SolveOutcome::Solved(vertex_only(d));
    }

    // Adjacent face normals, used to disambiguate the edge regions.
    let n_adb = ad.cross(ab);
    let u_adb = triple_product(d.point, b.point, n_adb);
    let v_adb = triple_product(b.point, a.point, n_adb);
    let w_adb = triple_product(a.point, d.point, n_adb);

    let n_acd = ac.cross(ad);
    let u_acd = triple_product(c.point, d.point, n_acd);
    let v_acd = triple_product(d.point, a.point, n_acd);
    let w_acd = triple_product(a.point, c.point, n_acd);

    let n_cbd = cb(bc).cross(cd);
    let u_cbd = triple_product(b.point, d.point, n_cbd);
    let v_cbd = triple_product(d.point, c.point, n_cbd);
    let w_cbd = triple_product(c.point, b.point, n_cbd);

    let n_abc = ab.cross(ac);
    let u_abc = triple_product(b.point, c.point, n_abc);
    let v_abc = triple_product(c.point, a.point, n_abc);
    let w_abc = triple_product(a.point, b.point, n_abc);

    // Edge regions. For edge "xy", u_xy is always x's weight and v_xy is
    // always y's weight, regardless of which point's frame the dot product
    // was taken in.
    if u_ab > 0.0 && v_ab > 0.0 && v_abc <= 0.0 && w_adb <= 0.0 {
        a.weight = u_ab;
        b.weight = v_ab;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [a, b],
            divisor: ab.length_squared(),
        });
    }
    if u_ca > 0.0 && v_ca > 0.0 && w_abc <= 0.0 && v_acd <= 0.0 {
        c.weight = u_ca;
        a.weight = v_ca;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [c, a],
            divisor: ca.length_squared(),
        });
    }
    if u_ad > 0.0 && v_ad > 0.0 && v_adb <= 0.0 && w_acd <= 0.0 {
        a.weight = u_ad;
        d.weight = v_ad;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [a, d],
            divisor: ad.length_squared(),
        });
    }
    if u_bc > 0.0 && v_bc > 0.0 && u_abc <= 0.0 && v_cbd <= 0.0 {
        b.weight = u_bc;
        c.weight = v_bc;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [b, c],
            divisor: bc.length_squared(),
        });
    }
    if u_dc > 0.0 && v_dc > 0.0 && w_cbd <= 0.0 && u_acd <= 0.0 {
        d.weight = u_dc;
        c.weight = v_dc;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [d, c],
            divisor: dc.length_squared(),
        });
    }
    if u_bd > 0.0 && v_bd > 0.0 && u_adb <= 0.0 && u_cbd <= 0.0 {
        b.weight = u_bd;
        d.weight = v_bd;
        return SolveOutcome::Solved(Simplex::Line {
            verts: [b, d],
            divisor: bd.length_squared(),
        });
    }

    // Face regions.
    let volume = triple_product(ab, ac, ad);
    if volume.abs() <= f32::EPSILON {
        return SolveOutcome::Degenerate;
    }

    let u_abcd = triple_product(c.point, d.point, b.point);
    let v_abcd = triple_product(c.point, a.point, d.point);
    let w_abcd = triple_product(d.point, a.point, b.point);
    let x_abcd = triple_product(b.point, a.point, c.point);

    // Face ADB (opposite C): name order A,D,B maps u->A, v->D, w->B.
    if u_abcd <= 0.0 && u_adb > 0.0 && v_adb > 0.0 && w_adb > 0.0 {
        a.weight = u_adb;
        d.weight = v_adb;
        b.weight = w_adb;
        return SolveOutcome::Solved(Simplex::Triangle {
            verts: [a, b, d],
            divisor: n_adb.length_squared(),
        });
    }
    // Face ACD (opposite B): name order A,C,D maps u->A, v->C, w->D.
    if v_abcd <= 0.0 && u_acd > 0.0 && v_acd > 0.0 && w_acd > 0.0 {
        a.weight = u_acd;
        c.weight = v_acd;
        d.weight = w_acd;
        return SolveOutcome::Solved(Simplex::Triangle {
            verts: [a, c, d],
            divisor: n_acd.length_squared(),
        });
    }
    // Face ABC (opposite D).
    if x_abcd <= 0.0 && u_abc > 0.0 && v_abc > 0.0 && w_abc > 0.0 {
        a.weight = u_abc;
        b.weight = v_abc;
        c.weight = w_abc;
        return SolveOutcome::Solved(Simplex::Triangle {
            verts: [a, b, c],
            divisor: n_abc.length_squared(),
        });
    }
    // Face CBD (opposite A): name order C,B,D maps u->C, v->B, w->D.
    if w_abcd <= 0.0 && u_cbd > 0.0 && v_cbd > 0.0 && w_cbd > 0.0 {
        c.weight = u_cbd;
        b.weight = v_cbd;
        d.weight = w_cbd;
        return SolveOutcome::Solved(Simplex::Triangle {
            verts: [c, b, d],
            divisor: n_cbd.length_squared(),
        });
    }

    // Interior: the origin is enclosed by the tetrahedron.
    let divisor = u_abcd + v_abcd + w_abcd + x_abcd;
    if divisor.abs() <= f32::EPSILON {
        return SolveOutcome::Degenerate;
    }
    a.weight = u_abcd;
    b.weight = v_abcd;
    c.weight = w_abcd;
    d.weight = x_abcd;
    SolveOutcome::Solved(Simplex::Tetrahedron {
        verts: [a, b, c, d],
        divisor,
    })
}

/// `-bc`, named separately since the CBD face normal is expressed in terms
/// of a vector from C to B rather than B to C.
fn cb(bc: Vec3) -> Vec3 {
    -bc
}
