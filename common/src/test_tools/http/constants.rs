/// Path prefix every endpoint of the fake service is mounted under.
pub const API_PREFIX: &str = "/api";

pub const VALID_INGREDIENT_IDS: [&str; 2] = ["61c0c5a71d1f82001bdaaa6d", "61c0c5a71d1f82001bdaaa76"];

pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const REQUIRED_FIELDS_MISSING: &str = "Email, password and name are required fields";
pub const INCORRECT_CREDENTIALS: &str = "email or password are incorrect";
pub const SHOULD_BE_AUTHORISED: &str = "You should be authorised";
pub const INGREDIENTS_REQUIRED: &str = "Ingredient ids must be provided";
pub const INCORRECT_INGREDIENTS: &str = "One or more ids provided are incorrect";
pub const INVALID_TOKEN: &str = "jwt malformed";
pub const USER_NOT_FOUND: &str = "User not found";
