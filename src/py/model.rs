use serde::{Deserialize, Serialize};

/// Lateral soil-response model selector.
///
/// `Auto` resolves by soil type: cohesive layers get `MatlockSoftClay`,
/// cohesionless layers get `ApiSand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PYModel {
    #[default]
    Auto,
    MatlockSoftClay,
    ApiSoftClay,
    ReeseStiffClayWater,
    WelchReeseStiffClay,
    BrownModifiedStiffClay,
    ReeseSand,
    ApiSand,
    SmallStrainSand,
    LiquefiedSandRollins,
    LiquefiedSandHybrid,
    WeakRock,
    StrongRock,
    MassiveRock,
    PiedmontResidual,
    Loess,
    CementedSilt,
    ElasticSubgrade,
    UserDefined,
}

/// Model-specific parameter bundle attached to a layer.
///
/// Only the fields the selected model reads are consulted; everything else
/// is ignored. `None` falls back to the model's documented default or the
/// consistency tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PYParams {
    /// Strain at 50% strength, clay models.
    pub eps50: Option<f64>,
    /// Matlock depth coefficient J.
    pub j_factor: Option<f64>,
    /// Initial subgrade modulus k, lb/in³.
    pub k_initial: Option<f64>,
    /// Rock unconfined compressive strength, psi.
    pub q_ur: Option<f64>,
    /// Initial rock mass modulus, psi.
    pub e_ir: Option<f64>,
    /// Rock quality designation, percent.
    pub rqd: Option<f64>,
    /// Weak-rock strain coefficient κ_rm.
    pub krm: Option<f64>,
    /// Intact rock strength σ_ci, psi (Hoek-Brown).
    pub sigma_ci: Option<f64>,
    /// Hoek-Brown material index m_i.
    pub m_i: Option<f64>,
    /// Geological strength index.
    pub gsi: Option<f64>,
    /// Rock mass modulus, psi.
    pub e_rock: Option<f64>,
    /// Rock Poisson ratio.
    pub nu: Option<f64>,
    /// Small-strain shear modulus G_max, psi.
    pub g_max: Option<f64>,
    /// Residual undrained strength for the liquefied hybrid, psf.
    pub residual_cu: Option<f64>,
    /// CPT tip resistance for loess, psi.
    pub q_c: Option<f64>,
    /// Cycle count for loess degradation.
    pub n_cyc: Option<f64>,
    /// User (y, p) pairs, inches and lb/in, sorted by y.
    pub user_curve: Option<Vec<(f64, f64)>>,
}

/// Cyclic softening data for the Matlock family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClaySoftening {
    /// z/z_r clamped to [0, 1]; 1 means at or below the transition depth.
    pub z_over_zr: f64,
}

/// A precomputed p-y curve at one node.
///
/// Every variant evaluates as an odd function of displacement; the
/// constants are resolved once per node so the solver inner loop only
/// does arithmetic. Units: y in inches, p in lb/in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PYCurve {
    /// Matlock/Welch power-law clay: p = 0.5·p_ult·(y/y50)^exp up to
    /// cap_mult·y50, then p_ult. Cyclic softening only for the Matlock
    /// exponent-1/3 family.
    PowerClay {
        p_ult: f64,
        y50: f64,
        exponent: f64,
        cap_mult: f64,
        softening: Option<ClaySoftening>,
    },
    /// Reese stiff clay below free water; segment breakpoints precomputed.
    StiffClayWater {
        kz: f64,
        p_c: f64,
        y50: f64,
        /// End of the parabolic branch, 6·A_s·y50.
        y_peak: f64,
        p_peak: f64,
        /// Unloading slope, lb/in per in (positive magnitude).
        unload_slope: f64,
        p_res: f64,
    },
    /// Brown modified stiff clay: min of the initial line and the
    /// 0.25-power Welch shape.
    BrownClay { kz: f64, p_ult: f64, y50: f64 },
    /// Reese sand / cemented silt: min of initial line and a
    /// tangent-matched parabola-line-flat shape.
    SandPiecewise {
        kz: f64,
        c: f64,
        exponent: f64,
        y_m: f64,
        p_m: f64,
        slope_m: f64,
        y_u: f64,
        p_ult: f64,
    },
    /// API sand: p = A·p_ult·tanh(k·z·y / (A·p_ult)).
    ApiSand { a_pu: f64, kz: f64 },
    /// Hardin-Drnevich small-strain overlay on API sand.
    SmallStrainSand {
        a_pu: f64,
        kz: f64,
        g_max: f64,
        y_r: f64,
    },
    /// Rollins 2005 liquefied sand (metric internals).
    Liquefied {
        /// Depth in meters.
        z_m: f64,
        /// Diameter factor.
        pd: f64,
    },
    /// Reese 1997 weak rock.
    WeakRock {
        m_ir: f64,
        y_a: f64,
        y_rm: f64,
        p_ur: f64,
    },
    /// Vuggy strong rock, bilinear with cap.
    StrongRock {
        k1: f64,
        y1: f64,
        k2: f64,
        p_u: f64,
    },
    /// Hyperbola p = y / (1/k_i + y/p_u); massive rock and loess.
    Hyperbolic { k_i: f64, p_u: f64 },
    /// Elastic subgrade, unbounded.
    Elastic { kz: f64 },
    /// Piecewise-linear user table, flat beyond the last point.
    Table { points: Vec<(f64, f64)> },
    /// Pointwise minimum of two curves (liquefied hybrid).
    Min(Box<PYCurve>, Box<PYCurve>),
}

/// Hard cap of the Rollins reference curve, kN/m.
const ROLLINS_CAP_KN_M: f64 = 15.0;

impl PYCurve {
    /// Soil resistance at a signed displacement, lb/in.
    pub fn p(&self, y: f64) -> f64 {
        if y < 0.0 {
            -self.p_abs(-y)
        } else {
            self.p_abs(y)
        }
    }

    fn p_abs(&self, y: f64) -> f64 {
        match self {
            PYCurve::PowerClay {
                p_ult,
                y50,
                exponent,
                cap_mult,
                softening,
            } => {
                let backbone = if y >= cap_mult * y50 {
                    *p_ult
                } else {
                    0.5 * p_ult * (y / y50).powf(*exponent)
                };
                match softening {
                    None => backbone,
                    Some(soft) => {
                        // Matlock cyclic: backbone to 3·y50 (≈0.72·p_ult),
                        // then degradation toward 0.72·p_ult·z/z_r at 15·y50.
                        let p_cyc = 0.72 * p_ult;
                        if y <= 3.0 * y50 {
                            backbone.min(p_cyc)
                        } else if soft.z_over_zr >= 1.0 {
                            p_cyc
                        } else if y >= 15.0 * y50 {
                            p_cyc * soft.z_over_zr
                        } else {
                            let frac = (y - 3.0 * y50) / (12.0 * y50);
                            p_cyc * (1.0 - (1.0 - soft.z_over_zr) * frac)
                        }
                    }
                }
            }
            PYCurve::StiffClayWater {
                kz,
                p_c,
                y50,
                y_peak,
                p_peak,
                unload_slope,
                p_res,
            } => {
                // The initial subgrade line caps every branch; without it
                // the post-peak branch would jump where k·z is small.
                if y <= *y_peak {
                    let parabola = 0.5 * p_c * (y / y50).sqrt();
                    parabola.min(kz * y)
                } else {
                    (p_peak - unload_slope * (y - y_peak))
                        .max(*p_res)
                        .min(kz * y)
                }
            }
            PYCurve::BrownClay { kz, p_ult, y50 } => {
                let welch = if y >= 16.0 * y50 {
                    *p_ult
                } else {
                    0.5 * p_ult * (y / y50).powf(0.25)
                };
                welch.min(kz * y)
            }
            PYCurve::SandPiecewise {
                kz,
                c,
                exponent,
                y_m,
                p_m,
                slope_m,
                y_u,
                p_ult,
            } => {
                let shape = if y <= *y_m {
                    c * y.powf(*exponent)
                } else if y <= *y_u {
                    p_m + slope_m * (y - y_m)
                } else {
                    *p_ult
                };
                shape.min(kz * y)
            }
            PYCurve::ApiSand { a_pu, kz } => {
                if *a_pu <= 0.0 {
                    0.0
                } else {
                    a_pu * (kz * y / a_pu).tanh()
                }
            }
            PYCurve::SmallStrainSand {
                a_pu,
                kz,
                g_max,
                y_r,
            } => {
                if *a_pu <= 0.0 {
                    return 0.0;
                }
                let p_api = a_pu * (kz * y / a_pu).tanh();
                let p_small = 4.0 * g_max * y / (1.0 + y / y_r);
                p_small.max(p_api).min(*a_pu)
            }
            PYCurve::Liquefied { z_m, pd } => {
                let y_mm = y * crate::units::MM_PER_IN;
                let a = 3e-7 * (z_m + 1.0).powf(6.05);
                let b = 2.8 * (z_m + 1.0).powf(0.11);
                let c = 2.85 * (z_m + 1.0).powf(-0.41);
                let p_kn_m = (a * (b * y_mm).powf(c)).min(ROLLINS_CAP_KN_M);
                pd * p_kn_m * crate::units::KN_PER_M_TO_LB_PER_IN
            }
            PYCurve::WeakRock {
                m_ir,
                y_a,
                y_rm,
                p_ur,
            } => {
                if y <= *y_a {
                    (m_ir * y).min(*p_ur)
                } else {
                    (0.5 * p_ur * (y / y_rm).powf(0.25)).min(*p_ur)
                }
            }
            PYCurve::StrongRock { k1, y1, k2, p_u } => {
                if y <= *y1 {
                    k1 * y
                } else {
                    (k1 * y1 + k2 * (y - y1)).min(*p_u)
                }
            }
            PYCurve::Hyperbolic { k_i, p_u } => {
                if *k_i <= 0.0 || *p_u <= 0.0 {
                    0.0
                } else {
                    y / (1.0 / k_i + y / p_u)
                }
            }
            PYCurve::Elastic { kz } => kz * y,
            PYCurve::Table { points } => {
                if points.is_empty() {
                    return 0.0;
                }
                let (y_last, p_last) = points[points.len() - 1];
                if y >= y_last {
                    return p_last;
                }
                let mut prev = (0.0, 0.0);
                for &(yi, pi) in points {
                    if y <= yi {
                        let (y0, p0) = prev;
                        if yi - y0 <= f64::EPSILON {
                            return pi;
                        }
                        return p0 + (pi - p0) * (y - y0) / (yi - y0);
                    }
                    prev = (yi, pi);
                }
                p_last
            }
            PYCurve::Min(a, b) => a.p_abs(y).min(b.p_abs(y)),
        }
    }

    /// Tangent slope ∂p/∂y at a signed displacement, by symmetric
    /// difference (analytic slopes are not worth maintaining across
    /// eighteen shapes).
    pub fn dp_dy(&self, y: f64) -> f64 {
        let h = 1e-6_f64.max(1e-6 * y.abs());
        (self.p(y + h) - self.p(y - h)) / (2.0 * h)
    }

    /// Ultimate resistance cap of the curve, lb/in (infinite for the
    /// elastic model).
    pub fn ultimate(&self) -> f64 {
        match self {
            PYCurve::PowerClay { p_ult, .. } => *p_ult,
            PYCurve::StiffClayWater { p_peak, .. } => *p_peak,
            PYCurve::BrownClay { p_ult, .. } => *p_ult,
            PYCurve::SandPiecewise { p_ult, .. } => *p_ult,
            PYCurve::ApiSand { a_pu, .. } => *a_pu,
            PYCurve::SmallStrainSand { a_pu, .. } => *a_pu,
            PYCurve::Liquefied { pd, .. } => {
                pd * ROLLINS_CAP_KN_M * crate::units::KN_PER_M_TO_LB_PER_IN
            }
            PYCurve::WeakRock { p_ur, .. } => *p_ur,
            PYCurve::StrongRock { p_u, .. } => *p_u,
            PYCurve::Hyperbolic { p_u, .. } => *p_u,
            PYCurve::Elastic { .. } => f64::INFINITY,
            PYCurve::Table { points } => points.last().map(|&(_, p)| p).unwrap_or(0.0),
            PYCurve::Min(a, b) => a.ultimate().min(b.ultimate()),
        }
    }

    /// Secant stiffness p/y with the displacement floored, lb/in².
    pub fn secant_stiffness(&self, y: f64, y_floor: f64) -> f64 {
        let ya = y.abs().max(y_floor);
        self.p_abs(ya) / ya
    }
}
