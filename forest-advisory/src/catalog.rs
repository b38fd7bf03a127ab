//! Scheme catalog.
//!
//! Every candidate intervention is a uniform entry of name, tags, a pure
//! scoring function and static narrative text. Catalog order is fixed and
//! doubles as the ranking tie-break order.

use crate::context::AdvisoryContext;

/// Upper bound of a scheme score.
pub const MAX_SCHEME_SCORE: f64 = 10.0;

/// Narrative text rendered for a selected scheme.
#[derive(Debug)]
pub struct SchemeText {
    pub rationale: &'static str,
    pub steps: &'static [&'static str],
    pub outcomes: &'static str,
    pub risks: &'static str,
}

impl SchemeText {
    /// Fallback for names with no dedicated text.
    pub const GENERIC: SchemeText = SchemeText {
        rationale: "The scheme matches the needs described for this community.",
        steps: &[
            "Confirm eligibility criteria with the implementing department.",
            "Prepare beneficiary lists through the Gram Sabha.",
            "Submit applications and track sanction at block level.",
        ],
        outcomes: "Improved access to government support for eligible households.",
        risks: "Eligibility gaps and slow sanction can delay benefits.",
    };
}

/// A candidate intervention program.
pub struct SchemeCandidate {
    /// Unique within the catalog
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub score_fn: fn(&AdvisoryContext) -> f64,
    pub text: SchemeText,
}

impl std::fmt::Debug for SchemeCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeCandidate")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl SchemeCandidate {
    /// Evaluate the scheme for a context, clamped to `[0, MAX_SCHEME_SCORE]`.
    pub fn score(&self, context: &AdvisoryContext) -> f64 {
        let raw = (self.score_fn)(context);
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, MAX_SCHEME_SCORE)
        }
    }
}

static GENERIC_TEXT: SchemeText = SchemeText::GENERIC;

/// Look up a catalog entry by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static SchemeCandidate> {
    CATALOG.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Text for a scheme name, falling back to [`SchemeText::GENERIC`].
pub fn text_for(name: &str) -> &'static SchemeText {
    find(name).map(|s| &s.text).unwrap_or(&GENERIC_TEXT)
}

/// `points` when `condition` holds.
fn bonus(condition: bool, points: f64) -> f64 {
    if condition {
        points
    } else {
        0.0
    }
}

fn score_pm_kisan(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.is_small_farmer, 5.0)
        + bonus(ctx.land().agricultural_land >= 20.0, 2.0)
        + bonus(f.wants_livelihood, 1.0)
}

fn score_pmksy(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.wants_irrigation, 5.0)
        + bonus(ctx.land().agricultural_land >= 30.0, 2.0)
        + bonus(f.is_small_farmer, 1.0)
}

fn score_mgnrega(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.wants_livelihood, 3.0)
        + bonus(f.is_tribal, 2.0)
        + bonus(ctx.land().population >= 500.0, 1.0)
        + bonus(f.is_small_farmer, 1.0)
}

fn score_van_dhan(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.is_tribal, 5.0)
        + bonus(f.wants_livelihood, 2.0)
        + bonus(ctx.land().forest_cover >= 30.0, 2.0)
}

fn score_nrlm(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.is_women_group, 5.0)
        + bonus(f.wants_livelihood, 2.0)
        + bonus(ctx.land().population >= 1000.0, 1.0)
}

fn score_pmay_g(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.wants_housing, 6.0)
        + bonus(f.is_tribal, 2.0)
        + bonus(ctx.land().population >= 500.0, 1.0)
}

fn score_pm_jay(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.wants_healthcare, 6.0)
        + bonus(ctx.land().population >= 1000.0, 2.0)
        + bonus(f.is_tribal, 1.0)
}

fn score_emrs(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.wants_education, 5.0) + bonus(f.is_tribal, 3.0)
}

fn score_campa(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(f.conservation_focus, 5.0)
        + bonus(ctx.land().forest_cover >= 60.0, 2.0)
        + bonus(ctx.land().total_area >= 100.0, 1.0)
}

fn score_bamboo_mission(ctx: &AdvisoryContext) -> f64 {
    let f = ctx.flags();
    bonus(ctx.land().forest_cover >= 30.0, 3.0)
        + bonus(f.wants_livelihood, 2.0)
        + bonus(f.is_tribal, 2.0)
}

/// The fixed scheme catalog, in tie-break order.
pub static CATALOG: &[SchemeCandidate] = &[
    SchemeCandidate {
        name: "PM-KISAN",
        tags: &["agriculture", "income support"],
        score_fn: score_pm_kisan,
        text: SchemeText {
            rationale: "Small and marginal cultivators, including FRA title holders, qualify for direct income support that stabilizes farm cash flow.",
            steps: &[
                "Compile a list of landholding households, including recognized forest rights holders.",
                "Seed Aadhaar and bank details through the village-level entrepreneur.",
                "Register beneficiaries on the PM-KISAN portal and verify at block level.",
            ],
            outcomes: "Rs 6,000 per year per eligible household in three instalments.",
            risks: "FRA titles missing from land records can exclude eligible households.",
        },
    },
    SchemeCandidate {
        name: "PMKSY",
        tags: &["irrigation", "agriculture"],
        score_fn: score_pmksy,
        text: SchemeText {
            rationale: "Irrigation demand on cultivated land fits the 'Har Khet Ko Pani' and 'Per Drop More Crop' components.",
            steps: &[
                "Identify command areas and water sources with the watershed committee.",
                "Prepare a village irrigation plan and include it in the district irrigation plan.",
                "Apply for micro-irrigation subsidy through the agriculture department.",
            ],
            outcomes: "Expanded irrigated area and a second cropping season.",
            risks: "Groundwater depletion if extraction is not matched with recharge structures.",
        },
    },
    SchemeCandidate {
        name: "MGNREGA",
        tags: &["employment", "livelihood"],
        score_fn: score_mgnrega,
        text: SchemeText {
            rationale: "Guaranteed wage employment supports livelihoods and can build land and water assets on FRA plots.",
            steps: &[
                "Issue job cards to all households that request them.",
                "Plan works on FRA land (land levelling, farm ponds) in the Gram Sabha labour budget.",
                "Ensure timely wage payment and social audit.",
            ],
            outcomes: "Up to 100 days of wage employment per household (150 for FRA title holders) and durable assets.",
            risks: "Wage payment delays reduce participation.",
        },
    },
    SchemeCandidate {
        name: "Van Dhan Vikas Yojana",
        tags: &["tribal", "ntfp", "livelihood"],
        score_fn: score_van_dhan,
        text: SchemeText {
            rationale: "Forest-dwelling communities with access to minor forest produce can add value through Van Dhan Kendras.",
            steps: &[
                "Form self-help groups of forest produce gatherers into a Van Dhan cluster.",
                "Submit the cluster proposal to the state implementing agency.",
                "Set up primary processing and market linkage with TRIFED support.",
            ],
            outcomes: "Higher returns on minor forest produce through processing and collective sale.",
            risks: "Weak market linkage can leave processed stock unsold.",
        },
    },
    SchemeCandidate {
        name: "DAY-NRLM",
        tags: &["women", "livelihood"],
        score_fn: score_nrlm,
        text: SchemeText {
            rationale: "Women's collectives can access revolving funds, bank credit and livelihood support through the rural livelihoods mission.",
            steps: &[
                "Mobilize women into self-help groups and village organizations.",
                "Release revolving fund and community investment fund.",
                "Link groups to bank credit and livelihood enterprises.",
            ],
            outcomes: "Stronger women's institutions and diversified household income.",
            risks: "Elite capture within groups if governance is weak.",
        },
    },
    SchemeCandidate {
        name: "PMAY-G",
        tags: &["housing"],
        score_fn: score_pmay_g,
        text: SchemeText {
            rationale: "Households without pucca housing qualify for construction assistance, with FRA land usable as the house site.",
            steps: &[
                "Verify households against the housing deprivation list.",
                "Geo-tag house sites, including sites on recognized forest land.",
                "Release instalments as construction stages are verified.",
            ],
            outcomes: "Pucca houses with basic amenities for eligible households.",
            risks: "Material cost escalation in remote forest villages.",
        },
    },
    SchemeCandidate {
        name: "PM-JAY",
        tags: &["health"],
        score_fn: score_pm_jay,
        text: SchemeText {
            rationale: "Health insurance cover protects households from catastrophic hospital expenditure.",
            steps: &[
                "Identify eligible families and generate Ayushman cards in village camps.",
                "Map the nearest empanelled hospitals and referral transport.",
                "Train ASHA workers to guide families through claims.",
            ],
            outcomes: "Cashless secondary and tertiary care up to Rs 5 lakh per family per year.",
            risks: "Distance to empanelled hospitals limits real access.",
        },
    },
    SchemeCandidate {
        name: "EMRS",
        tags: &["education", "tribal"],
        score_fn: score_emrs,
        text: SchemeText {
            rationale: "Eklavya Model Residential Schools provide quality residential education for tribal children.",
            steps: &[
                "Map school-age children and current enrolment.",
                "Coordinate admissions with the nearest EMRS.",
                "Arrange bridge courses for children re-entering school.",
            ],
            outcomes: "Higher secondary completion among tribal students.",
            risks: "Children may drop out if residential schools are far from home.",
        },
    },
    SchemeCandidate {
        name: "CAMPA",
        tags: &["conservation", "forest"],
        score_fn: score_campa,
        text: SchemeText {
            rationale: "High forest cover or a conservation focus qualifies the area for compensatory afforestation and forest regeneration funds.",
            steps: &[
                "Prepare a site-specific plantation and regeneration plan with the forest department.",
                "Involve the Gram Sabha and Joint Forest Management committee in site selection.",
                "Track survival rates and release funds in tranches.",
            ],
            outcomes: "Improved forest density, soil and water conservation, and local wage work.",
            risks: "Plantations on community land can conflict with recognized forest rights.",
        },
    },
    SchemeCandidate {
        name: "National Bamboo Mission",
        tags: &["forest", "livelihood"],
        score_fn: score_bamboo_mission,
        text: SchemeText {
            rationale: "Forested areas with bamboo resources can build income through plantation, processing and sale.",
            steps: &[
                "Assess bamboo stock and community rights over it.",
                "Set up nurseries and plantations with mission support.",
                "Link producer groups to processing units and buyers.",
            ],
            outcomes: "New bamboo-based enterprises and sustained harvest income.",
            risks: "Transit permit requirements can block sale even where rights exist.",
        },
    },
];
