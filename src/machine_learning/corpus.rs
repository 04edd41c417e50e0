/// Labelled messages the classifier is trained on at startup: (text, is_fraud).
pub const TRAINING_CORPUS: &[(&str, bool)] = &[
    ("Your bank account has been blocked. Update KYC immediately to unblock. Click here: http://scam.link/kyc", true),
    ("Congratulations! You have won a lottery prize of Rs 50,000. Claim now by calling 9999999999", true),
    ("URGENT: Your Aadhaar-linked account will be suspended. Verify OTP immediately to avoid deactivation.", true),
    ("Dear customer your SBI account is blocked please update your PAN card details immediately", true),
    ("You have received a reward of Rs 10,000. Click here to claim: http://reward.scam.in/claim", true),
    ("Free gift waiting for you! Limited period offer. Send your debit card number and PIN to redeem.", true),
    ("Your ATM card has been expired. Call us immediately to reissue. Share OTP for verification.", true),
    ("Act now! Your credit card will be deactivated in 24 hours. Update account details via http://fake.bank/update", true),
    ("KYC incomplete. Your account will be frozen. Send Aadhaar and PAN details urgently.", true),
    ("Lottery winner! You are selected for Rs 25 lakh prize. Verify your account number to receive funds.", true),
    ("ALERT: Suspicious activity on your account. Click here to verify: http://alert.phish.com", true),
    ("Your mobile number is linked to a suspicious account. OTP required to unfreeze.", true),
    ("Congratulations you won a cash back of Rs 5000. Share your credit card details to claim reward.", true),
    ("Bank of India: Your account is blocked due to incomplete KYC. Update immediately or account will be closed.", true),
    ("Win a free iPhone! Limited period offer. Click here and enter your PAN and Aadhaar: http://win.fake.in", true),
    ("Verify your account now to avoid suspension. OTP sent to your number. Share it immediately.", true),
    ("Your debit card PIN has been changed. If not done by you, call 1800-SCAM urgently.", true),
    ("You have been selected for a special reward. Act now and claim your prize before it expires.", true),
    ("URGENT: Your loan is approved. Click here to accept: http://loan.phish.net/accept", true),
    ("Dear user, your account will be deactivated. Send your password and OTP to verify identity.", true),
    ("Exclusive offer! Get Rs 2000 cash back on your credit card. Limited period. Click here to redeem.", true),
    ("Your PAN card is blocked. Update KYC by clicking this link: http://panupdate.fake.in", true),
    ("WINNER ALERT: You have won Rs 1 Crore in the national lottery. Call immediately to claim.", true),
    ("Security breach detected on your account. Verify your ATM PIN via http://securebank.phish.co", true),
    ("Hi! Are you coming to the party tonight? Let me know by 7pm.", false),
    ("Your package has been dispatched and will arrive by Friday. Track at official site.", false),
    ("Meeting rescheduled to 3pm tomorrow. Please confirm your availability.", false),
    ("Mom, I'll be home by 9. Don't wait for dinner.", false),
    ("Your OTP for login is 483920. Do not share this with anyone.", false),
    ("Thanks for your payment of Rs 500 to XYZ store. Your order is confirmed.", false),
    ("Reminder: Your appointment with Dr. Sharma is at 11am on Monday.", false),
    ("Happy Birthday! Wishing you a wonderful day filled with joy.", false),
    ("Your salary of Rs 45,000 has been credited to your account.", false),
    ("The electricity bill for your account is due on 28th. Pay via the official app.", false),
    ("Your subscription to Netflix has been renewed. Amount Rs 649 debited.", false),
    ("Can you please send me the report by end of day?", false),
    ("Your Ola ride is arriving. Driver: Ramesh, Car: DL 4C 1234", false),
    ("Flight PNR ABC123 confirmed. Departure: 6:30 AM. Check-in opens 24hr before.", false),
    ("Amazon: Your return has been processed. Refund of Rs 1299 will reflect in 3-5 days.", false),
    ("Don't forget we have a team lunch tomorrow at 1pm at the office cafeteria.", false),
    ("Your water purifier service is due. Call 98765 to schedule via official website.", false),
    ("You have successfully logged into your account. If not you, please call our helpline.", false),
    ("Your Jio recharge of Rs 239 is successful. Validity: 28 days.", false),
    ("School closed tomorrow due to heavy rain. Classes will resume on Monday.", false),
    ("Your insurance premium has been auto-debited. Policy remains active.", false),
    ("Dinner at 8? I know a great new place that opened downtown.", false),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_has_both_classes() {
        assert_eq!(TRAINING_CORPUS.len(), 46);
        let fraud = TRAINING_CORPUS.iter().filter(|(_, fraud)| *fraud).count();
        assert_eq!(fraud, 24);
    }
}
