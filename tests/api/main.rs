mod helpers;
mod preferences;
mod round;
