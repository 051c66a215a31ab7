mod privacy_level;
mod public_user;
mod user;
mod user_status;
mod verified_claims;
