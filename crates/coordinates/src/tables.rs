//! Built-in locality and state-centroid coordinates for India.
//!
//! Alternate spellings of the same place are listed as separate keys on
//! purpose; registry data uses all of them.

pub(crate) const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    // Karnataka
    ("Bangalore", 12.9716, 77.5946),
    ("Bengaluru", 12.9716, 77.5946),
    ("Banagalore", 12.9716, 77.5946),
    ("Bengaluru Urban", 12.9716, 77.5946),
    ("Whitefield", 12.9698, 77.7500),
    ("Electronic City", 12.8452, 77.6602),
    ("Mysore", 12.2958, 76.6394),
    ("Mysuru", 12.2958, 76.6394),
    ("Mangalore", 12.9141, 74.8560),
    ("Mangaluru", 12.9141, 74.8560),
    ("Hubli", 15.3647, 75.1240),
    ("Hubballi", 15.3647, 75.1240),
    ("Belgaum", 15.8497, 74.4977),
    ("Belagavi", 15.8497, 74.4977),
    // Maharashtra
    ("Mumbai", 19.0760, 72.8777),
    ("Bombay", 19.0760, 72.8777),
    ("Navi Mumbai", 19.0330, 73.0297),
    ("Thane", 19.2183, 72.9781),
    ("Airoli", 19.1590, 72.9986),
    ("Mahape", 19.1136, 73.0290),
    ("Rabale", 19.1380, 73.0030),
    ("Panvel", 18.9894, 73.1175),
    ("Taloja", 19.0650, 73.1167),
    ("Kharghar", 19.0473, 73.0699),
    ("Powai", 19.1176, 72.9060),
    ("Andheri", 19.1136, 72.8697),
    ("Chandivali", 19.1087, 72.9003),
    ("Vikhroli", 19.1110, 72.9270),
    ("Malad", 19.1874, 72.8484),
    ("Pune", 18.5204, 73.8567),
    ("Poona", 18.5204, 73.8567),
    ("Hinjawadi", 18.5913, 73.7389),
    ("Hinjewadi", 18.5913, 73.7389),
    ("Dighi", 18.6147, 73.8707),
    ("Chakan", 18.7606, 73.8636),
    ("Talegaon", 18.7350, 73.6756),
    ("Pimpri-Chinchwad", 18.6298, 73.7997),
    ("Nagpur", 21.1458, 79.0882),
    ("Nashik", 19.9975, 73.7898),
    ("Nasik", 19.9975, 73.7898),
    ("Aurangabad", 19.8762, 75.3433),
    ("Chhatrapati Sambhajinagar", 19.8762, 75.3433),
    // Delhi NCR
    ("Delhi", 28.7041, 77.1025),
    ("New Delhi", 28.6139, 77.2090),
    ("Okhla", 28.5308, 77.2713),
    ("Noida", 28.5355, 77.3910),
    ("Greater Noida", 28.4744, 77.5040),
    ("Gurgaon", 28.4595, 77.0266),
    ("Gurugram", 28.4595, 77.0266),
    ("Manesar", 28.3570, 76.9375),
    ("Faridabad", 28.4089, 77.3178),
    ("Ghaziabad", 28.6692, 77.4538),
    ("Sonipat", 28.9931, 77.0151),
    ("Sonepat", 28.9931, 77.0151),
    // Tamil Nadu
    ("Chennai", 13.0827, 80.2707),
    ("Madras", 13.0827, 80.2707),
    ("Ambattur", 13.1143, 80.1548),
    ("Siruseri", 12.8275, 80.2185),
    ("Sriperumbudur", 12.9675, 79.9419),
    ("Kanchipuram", 12.8342, 79.7036),
    ("Kancheepuram", 12.8342, 79.7036),
    ("Guindy", 13.0067, 80.2206),
    ("Taramani", 12.9863, 80.2432),
    ("Coimbatore", 11.0168, 76.9558),
    ("Kovai", 11.0168, 76.9558),
    ("Madurai", 9.9252, 78.1198),
    ("Tiruchirappalli", 10.7905, 78.7047),
    ("Trichy", 10.7905, 78.7047),
    ("Salem", 11.6643, 78.1460),
    ("Hosur", 12.7409, 77.8253),
    ("Thoothukudi", 8.7642, 78.1348),
    ("Tuticorin", 8.7642, 78.1348),
    ("Tirunelveli", 8.7139, 77.7567),
    // Telangana
    ("Hyderabad", 17.3850, 78.4867),
    ("Secunderabad", 17.4399, 78.4983),
    ("Cyberabad", 17.4474, 78.3762),
    ("Gachibowli", 17.4401, 78.3489),
    ("HITEC City", 17.4435, 78.3772),
    ("Hitech City", 17.4435, 78.3772),
    ("Shamshabad", 17.2403, 78.4294),
    ("Warangal", 17.9689, 79.5941),
    // Andhra Pradesh
    ("Visakhapatnam", 17.6868, 83.2185),
    ("Vishakhapatnam", 17.6868, 83.2185),
    ("Vizag", 17.6868, 83.2185),
    ("Vijayawada", 16.5062, 80.6480),
    ("Amaravati", 16.5417, 80.5150),
    ("Tirupati", 13.6288, 79.4192),
    ("Sri City", 13.5232, 80.0032),
    ("Kurnool", 15.8281, 78.0373),
    ("Anantapur", 14.6819, 77.6006),
    ("Anantapuramu", 14.6819, 77.6006),
    // West Bengal
    ("Kolkata", 22.5726, 88.3639),
    ("Calcutta", 22.5726, 88.3639),
    ("Salt Lake", 22.5867, 88.4171),
    ("Bidhannagar", 22.5867, 88.4171),
    ("New Town", 22.5958, 88.4795),
    ("Rajarhat", 22.5958, 88.4795),
    ("Howrah", 22.5958, 88.2636),
    // Gujarat
    ("Ahmedabad", 23.0225, 72.5714),
    ("Amdavad", 23.0225, 72.5714),
    ("Gandhinagar", 23.2156, 72.6369),
    ("GIFT City", 23.1606, 72.6847),
    ("Surat", 21.1702, 72.8311),
    ("Vadodara", 22.3072, 73.1812),
    ("Baroda", 22.3072, 73.1812),
    ("Rajkot", 22.3039, 70.8022),
    ("Bhuj", 23.2420, 69.6669),
    ("Kutch", 23.7337, 69.8597),
    ("Kachchh", 23.7337, 69.8597),
    ("Jamnagar", 22.4707, 70.0577),
    ("Mundra", 22.8390, 69.7219),
    ("Dholera", 22.2480, 72.1950),
    // Rajasthan
    ("Jaipur", 26.9124, 75.7873),
    ("Jodhpur", 26.2389, 73.0243),
    ("Udaipur", 24.5854, 73.7125),
    ("Jaisalmer", 26.9157, 70.9083),
    ("Bikaner", 28.0229, 73.3119),
    ("Barmer", 25.7532, 71.3967),
    // Uttar Pradesh
    ("Lucknow", 26.8467, 80.9462),
    ("Kanpur", 26.4499, 80.3319),
    ("Varanasi", 25.3176, 82.9739),
    ("Benares", 25.3176, 82.9739),
    ("Banaras", 25.3176, 82.9739),
    ("Prayagraj", 25.4358, 81.8463),
    ("Allahabad", 25.4358, 81.8463),
    ("Agra", 27.1767, 78.0081),
    // Madhya Pradesh
    ("Bhopal", 23.2599, 77.4126),
    ("Indore", 22.7196, 75.8577),
    // Chhattisgarh
    ("Raipur", 21.2514, 81.6296),
    ("Nava Raipur", 21.1610, 81.7870),
    ("Naya Raipur", 21.1610, 81.7870),
    ("Atal Nagar", 21.1610, 81.7870),
    // East and North East
    ("Bhubaneswar", 20.2961, 85.8245),
    ("Bhubaneshwar", 20.2961, 85.8245),
    ("Cuttack", 20.4625, 85.8830),
    ("Patna", 25.5941, 85.1376),
    ("Ranchi", 23.3441, 85.3096),
    ("Jamshedpur", 22.8046, 86.2029),
    ("Guwahati", 26.1445, 91.7362),
    ("Gauhati", 26.1445, 91.7362),
    ("Gangtok", 27.3389, 88.6065),
    ("Shillong", 25.5788, 91.8933),
    ("Imphal", 24.8170, 93.9368),
    ("Agartala", 23.8315, 91.2868),
    ("Aizawl", 23.7271, 92.7176),
    ("Kohima", 25.6751, 94.1086),
    ("Itanagar", 27.0844, 93.6053),
    // North
    ("Chandigarh", 30.7333, 76.7794),
    ("Mohali", 30.7046, 76.7179),
    ("Panchkula", 30.6942, 76.8606),
    ("Ludhiana", 30.9010, 75.8573),
    ("Amritsar", 31.6340, 74.8723),
    ("Dehradun", 30.3165, 78.0322),
    ("Shimla", 31.1048, 77.1734),
    ("Srinagar", 34.0837, 74.7973),
    ("Jammu", 32.7266, 74.8570),
    ("Leh", 34.1526, 77.5771),
    // Kerala
    ("Kochi", 9.9312, 76.2673),
    ("Cochin", 9.9312, 76.2673),
    ("Ernakulam", 9.9312, 76.2673),
    ("Thiruvananthapuram", 8.5241, 76.9366),
    ("Trivandrum", 8.5241, 76.9366),
    ("Kozhikode", 11.2588, 75.7804),
    ("Calicut", 11.2588, 75.7804),
    // Goa and union territories
    ("Panaji", 15.4909, 73.8278),
    ("Panjim", 15.4909, 73.8278),
    ("Puducherry", 11.9416, 79.8083),
    ("Pondicherry", 11.9416, 79.8083),
    ("Port Blair", 11.6234, 92.7265),
    ("Kavaratti", 10.5669, 72.6420),
    ("Daman", 20.3974, 72.8328),
    ("Silvassa", 20.2766, 73.0169),
];

pub(crate) const STATE_COORDINATES: &[(&str, f64, f64)] = &[
    ("Andhra Pradesh", 15.9129, 79.7400),
    ("Arunachal Pradesh", 28.2180, 94.7278),
    ("Assam", 26.2006, 92.9376),
    ("Bihar", 25.0961, 85.3131),
    ("Chhattisgarh", 21.2787, 81.8661),
    ("Goa", 15.2993, 74.1240),
    ("Gujarat", 22.2587, 71.1924),
    ("Haryana", 29.0588, 76.0856),
    ("Himachal Pradesh", 31.1048, 77.1734),
    ("Jharkhand", 23.6102, 85.2799),
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Madhya Pradesh", 22.9734, 78.6569),
    ("Maharashtra", 19.7515, 75.7139),
    ("Manipur", 24.6637, 93.9063),
    ("Meghalaya", 25.4670, 91.3662),
    ("Mizoram", 23.1645, 92.9376),
    ("Nagaland", 26.1584, 94.5624),
    ("Odisha", 20.9517, 85.0985),
    ("Orissa", 20.9517, 85.0985),
    ("Punjab", 31.1471, 75.3412),
    ("Rajasthan", 27.0238, 74.2179),
    ("Sikkim", 27.5330, 88.5122),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Telangana", 18.1124, 79.0193),
    ("Tripura", 23.9408, 91.9882),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Uttarakhand", 30.0668, 79.0193),
    ("Uttaranchal", 30.0668, 79.0193),
    ("West Bengal", 22.9868, 87.8550),
    ("Andaman and Nicobar Islands", 11.7401, 92.6586),
    ("Chandigarh", 30.7333, 76.7794),
    ("Dadra and Nagar Haveli and Daman and Diu", 20.3974, 72.8328),
    ("Delhi", 28.7041, 77.1025),
    ("NCT of Delhi", 28.7041, 77.1025),
    ("Jammu and Kashmir", 33.7782, 76.5762),
    ("Ladakh", 34.1526, 77.5771),
    ("Lakshadweep", 10.5667, 72.6417),
    ("Puducherry", 11.9416, 79.8083),
];
