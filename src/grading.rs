//! End-of-game grading
//!
//! Net score can be negative when power-up spend outran earnings; such scores
//! are graded as-is and land in the second tier.

use serde::Serialize;

/// Qualitative result shown on the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grade {
    /// 1 (lowest) to 6 (highest)
    pub tier: u8,
    pub title: &'static str,
    pub comment: &'static str,
}

const GRADES: [Grade; 6] = [
    Grade {
        tier: 1,
        title: "Pacifist",
        comment: "If I never swing, math can never hurt me. Respect!",
    },
    Grade {
        tier: 2,
        title: "Arithmetic Insulator",
        comment: "Your math teacher is on the way, and they brought a ruler...",
    },
    Grade {
        tier: 3,
        title: "Hype Squad Captain",
        comment: "The moles never saw it coming. Chin up, your tapping form is great.",
    },
    Grade {
        tier: 4,
        title: "Mental Math Motor",
        comment: "Now that's flashy! Speed like this deserves a doping test.",
    },
    Grade {
        tier: 5,
        title: "Compute Ceiling",
        comment: "Warning: non-human reflexes detected. Are you an AI in disguise?",
    },
    Grade {
        tier: 6,
        title: "Keeper of Numbers",
        comment: "The limits of human arithmetic have fallen. Right now, you are the truth!",
    },
];

/// Map a final net score to its grade
pub fn grade_for(net_score: i64) -> Grade {
    let idx = match net_score {
        0 => 0,
        s if s < 15 => 1,
        s if s <= 100 => 2,
        s if s <= 250 => 3,
        s if s <= 500 => 4,
        _ => 5,
    };
    GRADES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (0, 1),
            (5, 2),
            (14, 2),
            (15, 3),
            (100, 3),
            (101, 4),
            (250, 4),
            (251, 5),
            (500, 5),
            (501, 6),
        ];
        for (score, tier) in cases {
            assert_eq!(grade_for(score).tier, tier, "score {score}");
        }
    }

    #[test]
    fn test_negative_scores() {
        assert_eq!(grade_for(-40).tier, 2);
    }
}
