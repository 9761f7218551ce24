use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeTemplate {
    pub challenge_type: &'static str,
    pub text: &'static str,
    pub xp_reward: i32,
}

pub const CHALLENGE_TEMPLATES: [ChallengeTemplate; 10] = [
    ChallengeTemplate { challenge_type: "pushups", text: "Do 50 pushups today!", xp_reward: 30 },
    ChallengeTemplate { challenge_type: "squats", text: "Complete 100 squats!", xp_reward: 35 },
    ChallengeTemplate { challenge_type: "plank", text: "Hold a plank for 2 minutes total", xp_reward: 25 },
    ChallengeTemplate { challenge_type: "water", text: "Drink 10 glasses of water", xp_reward: 20 },
    ChallengeTemplate { challenge_type: "steps", text: "Walk 5000 steps", xp_reward: 40 },
    ChallengeTemplate { challenge_type: "stretching", text: "10 minutes of stretching", xp_reward: 15 },
    ChallengeTemplate { challenge_type: "no_sugar", text: "No sugar for the entire day!", xp_reward: 50 },
    ChallengeTemplate { challenge_type: "protein", text: "Eat 100g of protein", xp_reward: 30 },
    ChallengeTemplate { challenge_type: "cardio", text: "20 minutes of cardio", xp_reward: 35 },
    ChallengeTemplate { challenge_type: "meditation", text: "5 minutes of meditation", xp_reward: 20 },
];

pub fn pick_challenge<R: Rng + ?Sized>(rng: &mut R) -> ChallengeTemplate {
    *CHALLENGE_TEMPLATES
        .choose(rng)
        .unwrap_or(&CHALLENGE_TEMPLATES[0])
}
